use anyhow::Result;
use clap::Parser;
use omero_login::cli::{self, Cli};

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();

    // Initialize logging: --log-level takes precedence over DEBUG_LEVEL.
    omero_login::debug::init_log_bridge(cli.log_level, cli.log_file.as_deref());

    log::info!("Starting omero-login {}", omero_login::VERSION);

    match cli::run(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("omero-login: error: {e:#}");
            std::process::exit(1);
        }
    }
}
