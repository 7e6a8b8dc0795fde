use std::path::PathBuf;

use anyhow::Context;
use pytris_engine::GameConfig;

use crate::util;

/// Options shared by every command that builds a game.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Game configuration file (JSON). Missing fields take their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of board columns
    #[clap(long)]
    cols: Option<usize>,
    /// Number of board rows
    #[clap(long)]
    rows: Option<usize>,
    /// Number of upcoming pieces to show
    #[clap(long = "next")]
    num_nextup: Option<usize>,
}

impl ConfigArg {
    /// Builds the configuration: defaults, then the config file, then individual flags.
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(cols) = self.cols {
            config.num_cols = cols;
        }
        if let Some(rows) = self.rows {
            config.num_rows = rows;
        }
        if let Some(num_nextup) = self.num_nextup {
            config.num_nextup = num_nextup;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ConfigArg::default().load().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = ConfigArg {
            cols: Some(12),
            num_nextup: Some(1),
            ..ConfigArg::default()
        };
        let config = arg.load().unwrap();
        assert_eq!(config.num_cols, 12);
        assert_eq!(config.num_rows, 20);
        assert_eq!(config.num_nextup, 1);
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let arg = ConfigArg {
            cols: Some(5),
            ..ConfigArg::default()
        };
        let err = arg.load().unwrap_err();
        assert!(
            format!("{err:#}").contains("spawn point (4, 0) puts piece I outside the 5x20 board")
        );
    }
}
