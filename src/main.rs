// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// - config:      Run configuration (defaults + optional config.json)
// - schema:      Collection log item and summary record types
// - members:     Member list loader
// - source:      Collection log sources (HTTP)
// - extract:     Document navigation and field extraction
// - output:      Text block formatting and append-only sink
// - leaderboard: Pet hiscores over one run
// - collector:   The sequential run loop
// - util:        Formatting helpers
//
mod config;
mod schema;
mod members;
mod source;
mod extract;
mod output;
mod leaderboard;
mod collector;
mod util;

use collector::runner::run;
use config::load_config;
use source::client::HttpSource;

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Fetches the collection log of every member in the member list
// and appends a pets/pluses summary per member to the output file.
//
// Logging goes through `log`; set RUST_LOG to change verbosity
// (default: info).
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config("config.json")?;
    let source = HttpSource::new(&config.service)?;

    run(&config, &source).await?;

    Ok(())
}
