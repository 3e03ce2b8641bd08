use std::sync::Arc;

use flatpage::config::load_config;
use flatpage::startup::run;
use flatpage::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
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
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
