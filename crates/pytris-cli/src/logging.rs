use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// File to write the log to (the terminal is used by the game)
    #[clap(long, default_value = "pytris.log")]
    log_file: PathBuf,
    /// Log filter, e.g. `debug` or `pytris_engine=debug`. Overrides `RUST_LOG`
    #[clap(long)]
    log_level: Option<String>,
    /// Disable logging
    #[clap(long, default_value_t = false)]
    no_log: bool,
}

impl Default for LogArg {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("pytris.log"),
            log_level: None,
            no_log: false,
        }
    }
}

impl LogArg {
    fn filter(&self) -> anyhow::Result<EnvFilter> {
        let filter = match &self.log_level {
            Some(directives) => EnvFilter::try_new(directives)
                .with_context(|| format!("Invalid log level: {directives}"))?,
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };
        Ok(filter)
    }
}

/// Installs the global `tracing` subscriber writing to the log file.
pub(crate) fn init(arg: &LogArg) -> anyhow::Result<()> {
    if arg.no_log {
        return Ok(());
    }
    let filter = arg.filter()?;
    let file = File::create(&arg.log_file)
        .with_context(|| format!("Failed to create log file: {}", arg.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install the log subscriber: {e}"))?;
    Ok(())
}
