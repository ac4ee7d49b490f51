//! Serial transport abstraction.
//!
//! The device session talks to hardware through the [`SerialTransport`]
//! trait rather than `serialport` directly, so unit tests can run against
//! the in-memory implementation in [`mock`] without a USB device plugged
//! in. [`PortScanner`] plays the same role for port enumeration.

pub mod mock;

use std::io::Write;
use std::time::Duration;

use serialport::SerialPortType;
use thiserror::Error;
use tracing::info;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors from the serial layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Opening the port failed (wrong permissions, device yanked between
    /// scan and open, ...).
    #[error("failed to open serial port {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    /// Enumerating system serial ports failed.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    /// A write or flush on an open port failed.
    #[error("serial write failed: {0}")]
    Write(#[source] std::io::Error),

    /// The liveness probe could not read the port state.
    #[error("serial liveness probe failed: {0}")]
    Probe(#[source] serialport::Error),

    /// The port has been closed; the session should be discarded.
    #[error("serial port {0} is not open")]
    Closed(String),
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// Byte-level access to one serial port.
pub trait SerialTransport: Send {
    /// Writes the whole buffer to the port.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Flushes buffered output to the device.
    fn flush(&mut self) -> Result<(), TransportError>;

    /// Number of bytes waiting in the receive buffer.
    ///
    /// Used as a passive liveness probe: the call fails once the device
    /// has been unplugged, without writing anything to it.
    fn bytes_to_read(&self) -> Result<u32, TransportError>;

    /// Whether the port is still open. Does not probe the device.
    fn is_open(&self) -> bool;

    /// Closes the port. Idempotent.
    fn close(&mut self);

    /// The OS path of the port (for logging).
    fn path(&self) -> &str;
}

/// A candidate port reported by the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub path: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub description: Option<String>,
}

/// Enumerates candidate serial ports.
#[cfg_attr(test, mockall::automock)]
pub trait PortScanner {
    fn scan(&self) -> Result<Vec<PortInfo>, TransportError>;
}

// ── Production implementations ────────────────────────────────────────────────

/// [`SerialTransport`] over a real USB serial port.
pub struct UsbSerialTransport {
    port: Option<Box<dyn serialport::SerialPort>>,
    path: String,
}

impl UsbSerialTransport {
    /// Opens `path` at the given baud rate with a short read timeout.
    pub fn open(path: &str, baud: u32, read_timeout: Duration) -> Result<Self, TransportError> {
        let port = serialport::new(path, baud)
            .timeout(read_timeout)
            .open()
            .map_err(|source| TransportError::Open { path: path.to_owned(), source })?;
        Ok(Self { port: Some(port), path: path.to_owned() })
    }

    fn open_port(&mut self) -> Result<&mut Box<dyn serialport::SerialPort>, TransportError> {
        self.port
            .as_mut()
            .ok_or_else(|| TransportError::Closed(self.path.clone()))
    }
}

impl SerialTransport for UsbSerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.open_port()?.write_all(bytes).map_err(TransportError::Write)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.open_port()?.flush().map_err(TransportError::Write)
    }

    fn bytes_to_read(&self) -> Result<u32, TransportError> {
        match &self.port {
            Some(port) => port.bytes_to_read().map_err(TransportError::Probe),
            None => Err(TransportError::Closed(self.path.clone())),
        }
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            info!(port = %self.path, "closed serial port");
        }
    }

    fn path(&self) -> &str {
        &self.path
    }
}

/// [`PortScanner`] over the system serial port list.
pub struct UsbPortScanner;

impl PortScanner for UsbPortScanner {
    fn scan(&self) -> Result<Vec<PortInfo>, TransportError> {
        let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
        Ok(ports
            .into_iter()
            .map(|port| {
                let (vid, pid, description) = match port.port_type {
                    SerialPortType::UsbPort(usb) => (Some(usb.vid), Some(usb.pid), usb.product),
                    _ => (None, None, None),
                };
                PortInfo { path: port.port_name, vid, pid, description }
            })
            .collect())
    }
}
