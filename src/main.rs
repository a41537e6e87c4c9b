mod bridge;
mod devices;
mod store;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt;

use devices::Arduino;
use store::FirestoreClient;

// Fixed per deployment; edit to match the machine this runs on.
const CREDENTIALS_PATH: &str = "my-firebase-key.json";
const SERIAL_PORT: &str = "COM3";
const BAUD_RATE: u32 = 9600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = setup_logging();
    info!("Starting Arduino-to-Firestore bridge");

    let mut firestore = match FirestoreClient::from_key_file(CREDENTIALS_PATH) {
        Ok(client) => {
            info!("Firestore client ready");
            client
        }
        Err(e) => {
            error!("Failed to initialize Firestore client: {}", e);
            return Err(Box::new(e));
        }
    };

    let mut arduino = Arduino::new(SERIAL_PORT, BAUD_RATE);
    if let Err(e) = arduino.connect() {
        error!("Failed to open serial port {}: {}", SERIAL_PORT, e);
        return Err(Box::new(e));
    }
    println!("Connected to {SERIAL_PORT}. Forwarding data (Ctrl+C to stop)...");

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))?;
    }

    let result = bridge::run_bridge(&mut arduino, &mut firestore, &shutdown);
    arduino.close();

    match result {
        Ok(stats) => {
            info!(
                "Bridge stopped: {} lines received, {} forwarded, {} rejected, {} write failures",
                stats.lines_received,
                stats.records_forwarded,
                stats.lines_rejected,
                stats.write_failures
            );
            println!("Stopped. Forwarded {} records.", stats.records_forwarded);
        }
        Err(e) => {
            error!("Bridge terminated: {}", e);
            return Err(e.into());
        }
    }

    info!("Application shutting down");
    Ok(())
}

fn setup_logging() -> WorkerGuard {
    let file_appender = rolling::daily("logs", "bridge.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .init();

    guard
}
