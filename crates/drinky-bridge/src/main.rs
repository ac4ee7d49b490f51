//! Drinky Board bridge entry point.
//!
//! Headless service loop: loads configuration, then keeps one controller
//! session alive — rescanning while disconnected, health-checking while
//! connected — until Ctrl-C. Client-facing transports (the HTTP surface)
//! sit in front of this binary and drive the [`InputHandler`] through the
//! library API.
//!
//! [`InputHandler`]: drinky_bridge::InputHandler

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use drinky_bridge::application::DeviceManager;
use drinky_bridge::domain::config::load_config;
use drinky_bridge::infrastructure::serial::{PortInfo, UsbPortScanner, UsbSerialTransport};

/// Config file path: first CLI argument, or `drinky.toml` next to the
/// working directory.
fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("drinky.toml"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Drinky Board bridge starting");

    let config = load_config(&config_path())?;
    config.validate()?;

    // Shutdown flag shared with the Ctrl-C handler.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    let scanner = UsbPortScanner;
    let serial = config.serial.clone();
    let read_timeout = config.read_timeout();
    let mut opener = move |info: &PortInfo| {
        UsbSerialTransport::open(&info.path, serial.baud_rate, read_timeout)
    };

    let mut manager =
        DeviceManager::with_intervals(config.health_check_interval(), config.scan_interval())
            .heartbeat_interval(config.heartbeat_interval());

    info!("Drinky Board bridge ready.  Press Ctrl-C to exit.");

    loop {
        tokio::time::sleep(Duration::from_millis(100)).await;
        manager.tick(&scanner, &mut opener);
        if !running.load(Ordering::Relaxed) {
            break;
        }
    }

    manager.shutdown();
    info!("Drinky Board bridge stopped");
    Ok(())
}
