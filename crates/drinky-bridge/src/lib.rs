//! # drinky-bridge
//!
//! Service crate for the Drinky Board: discovers the controller over USB
//! serial, owns the device session, and turns client key events into the
//! 13-byte switch commands defined in `drinky-core`.
//!
//! Layering follows the usual split:
//!
//! - **`domain`** – Configuration types, no I/O.
//! - **`infrastructure`** – The serial transport and the device session.
//! - **`application`** – Key event handling and the background device
//!   manager that keeps exactly one session alive.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{DeviceManager, InputHandler, InputOutcome, KeyEventKind};
pub use domain::config::{load_config, BridgeConfig, ConfigError};
pub use infrastructure::device::{find_devices, matches_identity, DeviceSession};
pub use infrastructure::serial::{PortInfo, PortScanner, SerialTransport, TransportError};
