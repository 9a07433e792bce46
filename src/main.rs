use std::path::PathBuf;

use anyhow::Context;
use chartkit::{init_logging, load_session, replay, Config, BUILD_DATE, VERSION};
use clap::Parser;
use tracing::info;

/// Replay a scripted chart drawing session and print the final state.
#[derive(Parser, Debug)]
#[command(name = "chartkit", version)]
struct Args {
    /// Session file (JSON) with the surface, starting scene and events.
    session: PathBuf,

    /// Config file (TOML or JSON); defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;
    info!(version = VERSION, build_date = BUILD_DATE, "ChartKit session replay");

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };

    let script = load_session(&args.session)?;
    let report = replay(&script, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
