use dotenv::dotenv;
use rently_backend::app::app::App;
use rently_backend::util::logger::Logger;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Keep the guards alive for the lifetime of the process so the
    // non-blocking file writers keep flushing.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("Starting Rently backend");

    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
