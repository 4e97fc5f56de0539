use clap::Parser;
use kosmoss_attitude::config::attitude::AttitudeConfig;
use kosmoss_attitude::output::write_history;
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "attitude-sim", about = "Evaluate a spacecraft attitude model over time")]
struct Args {
    /// TOML model description
    #[arg(long)]
    config: PathBuf,

    /// CSV output path
    #[arg(long, default_value = "output/attitude.csv")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg = AttitudeConfig::from_file(&args.config)?;
    info!(?cfg, "Loaded attitude configuration");

    let mut attitude = cfg.build()?;
    for notice in attitude.initialize()? {
        warn!(model = attitude.model_name(), "{}", notice);
    }

    let epochs = cfg.propagation.epochs(attitude.epoch())?;

    if let Some(dir) = args.output.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&args.output)?;
    let rows = write_history(&mut attitude, &epochs, file)?;

    info!(
        model = attitude.model_name(),
        rows,
        output = %args.output.display(),
        "Attitude history written"
    );
    Ok(())
}
