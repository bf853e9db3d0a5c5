use std::process;

use reframe::{cli, config::Config, storage::Storage};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("REFRAME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let root = Storage::default_root().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
