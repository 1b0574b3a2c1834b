//! `tally` — entry point for operating a local governance ledger.

use clap::Parser;
use tally_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    tally_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let output = run(&config, &cli.command)?;
    print!("{output}");
    Ok(())
}
