use std::sync::Arc;

use routerelay::config::{load_config, print_schema};
use routerelay::startup::run;
use routerelay::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Error printing configuration schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(Arc::new(config)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
