use std::env;
use std::error::Error;
use std::process;

use clap::Parser;

use crate::supervisor::Supervisor;

mod cli;
mod config;
mod input;
mod links;
mod supervisor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = cli::Args::parse();

    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting padmirror v{}", VERSION);

    // Setup CTRL+C handler. The virtual device node and any open file
    // descriptors are reclaimed by the kernel on process exit.
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        log::info!("Shutting down");
        process::exit(0);
    });

    let config = args.into_config()?;
    log::debug!("Using config: {:?}", config);

    let mut supervisor = Supervisor::new(config);
    if let Err(e) = supervisor.run().await {
        log::error!("Failed to set up virtual gamepad: {e}");
        return Err(e.into());
    }

    log::info!("padmirror stopped");

    Ok(())
}
