use clap::{Parser, Subcommand};

use self::{play::PlayArg, show_config::ShowConfigArg};

mod game_config;
mod play;
mod show_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (the default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective game configuration as JSON
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::ShowConfig(arg) => show_config::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["pytris"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_flags() {
        let args = CommandArgs::try_parse_from([
            "pytris",
            "play",
            "--cols",
            "8",
            "--fps",
            "30",
            "--seed",
            "0123456789abcdef0123456789abcdef",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }

    #[test]
    fn test_bad_seed_is_rejected_by_parser() {
        assert!(CommandArgs::try_parse_from(["pytris", "play", "--seed", "xyz"]).is_err());
    }
}
