mod command;
mod logging;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
