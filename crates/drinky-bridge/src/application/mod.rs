//! Application services: key event handling and session lifecycle.

mod device_manager;
mod input_handler;

pub use device_manager::{DeviceManager, HEALTH_CHECK_INTERVAL, SCAN_INTERVAL};
pub use input_handler::{InputHandler, InputOutcome, KeyEventKind, TAP_DELAY};
