use anyhow::Context;
use pytris_engine::{GameSession, PieceSeed};
use pytris_runtime::Runtime;
use rand::Rng as _;
use tracing::info;

use crate::{command::game_config::ConfigArg, logging::LogArg};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Seed for the piece sequence (32 hex digits). Random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Frames per second
    #[clap(long)]
    fps: Option<f64>,
    #[clap(flatten)]
    log: LogArg,
}

const DEFAULT_FPS: f64 = 60.0;

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        seed,
        fps,
        log,
    } = arg;

    crate::logging::init(log)?;
    let config = config.load()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let fps = fps.unwrap_or(DEFAULT_FPS);
    info!(%seed, fps, ?config, "starting pytris");

    let mut app = PlayApp::new(GameSession::new(config, seed), fps);
    Runtime::new().run(&mut app).context("Terminal I/O failed")?;
    app.finish()
}
