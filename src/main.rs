use anyhow::Result;
use clap::Parser;
use gym_occupancy::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.is_non_interactive() {
        gym_occupancy::logging::init("warn");
        gym_occupancy::run_once(&cli).await
    } else {
        // the dashboard owns the terminal, so stay quiet unless RUST_LOG asks
        gym_occupancy::logging::init("off");
        gym_occupancy::run(cli).await
    }
}
