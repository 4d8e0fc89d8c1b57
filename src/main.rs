use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gridpoly::{init_logging, Config, Session, BUILD_DATE, USAGE, VERSION};

/// Grid-snapping polygon sketcher driven by text commands.
#[derive(Parser, Debug)]
#[command(name = "gridpoly", version)]
struct Args {
    /// Configuration file (TOML or JSON). Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::load_or_default().unwrap_or_else(|err| {
            tracing::warn!("Using default configuration: {}", err);
            Config::default()
        })),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;

    tracing::info!("gridpoly {} (built {})", VERSION, BUILD_DATE);
    let config = load_config(args.config.as_ref())?;

    for line in USAGE {
        println!("{}", line);
    }

    let mut session = Session::new(config);
    let stdout = io::stdout();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), stdout.lock())?;
        }
        None => session.run(io::stdin().lock(), stdout.lock())?,
    }

    let frames = session.shutdown();
    tracing::debug!("Rendered {} frames", frames);
    Ok(())
}
