//! Controller discovery and the device session.
//!
//! The board's microcontroller (an Adafruit ItsyBitsy 32u4) shows up as a
//! USB CDC serial port. Discovery matches ports by USB VID/PID or by a
//! substring of the port description; the session then owns the open
//! transport and the liveness bookkeeping around it.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use drinky_core::{encode_command, KeyAction, KeyDefinition, SwitchCommand};

use crate::infrastructure::serial::{PortInfo, PortScanner, SerialTransport, TransportError};

// ── Identity constants ────────────────────────────────────────────────────────

/// USB VID/PID pairs the controller enumerates with.
pub const KNOWN_VID_PID: &[(u16, u16)] = &[
    (0x239A, 0x8001), // Adafruit ItsyBitsy 32u4
];

/// Case-insensitive substring matched against the port description.
pub const DESCRIPTION_MATCH: &str = "itsybitsy";

/// Baud rate of the controller's CDC serial link.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Read timeout for the port. Nothing is ever read from the device, so
/// this only bounds the passive liveness probe.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// Minimum time between liveness probes. Between probes the session
/// trusts its last known state and never touches the port.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Whether a scanned port looks like the controller.
pub fn matches_identity(info: &PortInfo) -> bool {
    if let Some(description) = &info.description {
        if description.to_lowercase().contains(DESCRIPTION_MATCH) {
            return true;
        }
    }
    match (info.vid, info.pid) {
        (Some(vid), Some(pid)) => KNOWN_VID_PID.contains(&(vid, pid)),
        _ => false,
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Scans for controller ports and opens a session on each match.
///
/// A port that matches but fails to open is logged and skipped; it does
/// not abort the scan. An empty result is a valid state (board unplugged),
/// not an error — callers retry on their own schedule.
pub fn find_devices<S, F, T>(scanner: &S, mut opener: F) -> Vec<DeviceSession<T>>
where
    S: PortScanner,
    F: FnMut(&PortInfo) -> Result<T, TransportError>,
    T: SerialTransport,
{
    let ports = match scanner.scan() {
        Ok(ports) => ports,
        Err(e) => {
            warn!(error = %e, "serial port enumeration failed");
            return Vec::new();
        }
    };

    let mut sessions = Vec::new();
    for info in ports.iter().filter(|info| matches_identity(info)) {
        match opener(info) {
            Ok(transport) => {
                info!(port = %info.path, "discovered controller");
                sessions.push(DeviceSession::new(transport));
            }
            Err(e) => {
                warn!(port = %info.path, error = %e, "failed to open controller port");
            }
        }
    }
    sessions
}

// ── The session ───────────────────────────────────────────────────────────────

/// One open connection to the controller.
///
/// The session moves through three states: connected, unresponsive (a
/// liveness probe failed), and closed. It never reconnects on its own;
/// once unresponsive, the owning manager closes it and re-runs discovery.
pub struct DeviceSession<T: SerialTransport> {
    transport: T,
    last_heartbeat: Instant,
    heartbeat_interval: Duration,
}

impl<T: SerialTransport> DeviceSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_heartbeat_interval(transport, HEARTBEAT_INTERVAL)
    }

    /// Mainly for tests, which shrink the interval to force or suppress
    /// probing.
    pub fn with_heartbeat_interval(transport: T, heartbeat_interval: Duration) -> Self {
        Self {
            transport,
            last_heartbeat: Instant::now(),
            heartbeat_interval,
        }
    }

    /// Retunes the probe gating, e.g. from loaded configuration.
    pub fn set_heartbeat_interval(&mut self, heartbeat_interval: Duration) {
        self.heartbeat_interval = heartbeat_interval;
    }

    /// The OS path of the underlying port.
    pub fn port(&self) -> &str {
        self.transport.path()
    }

    /// Whether the device is connected and believed responsive.
    ///
    /// Cheap between heartbeats: the port is only probed once
    /// `heartbeat_interval` has elapsed since the last successful probe.
    pub fn is_connected(&mut self) -> bool {
        if !self.transport.is_open() {
            return false;
        }
        if self.last_heartbeat.elapsed() > self.heartbeat_interval {
            return self.probe();
        }
        true
    }

    fn probe(&mut self) -> bool {
        match self.transport.bytes_to_read() {
            Ok(_) => {
                self.last_heartbeat = Instant::now();
                true
            }
            Err(e) => {
                warn!(port = %self.transport.path(), error = %e, "liveness probe failed");
                false
            }
        }
    }

    /// Sends one switch command; returns whether it reached the port.
    ///
    /// Never panics and never retries. A `false` from here means the
    /// device is gone or going; the caller decides what to do about it.
    pub fn send(&mut self, command: &SwitchCommand) -> bool {
        if !self.is_connected() {
            debug!(port = %self.transport.path(), "dropping command; device not connected");
            return false;
        }

        let frame = encode_command(command);
        let result = self
            .transport
            .write_all(&frame)
            .and_then(|()| self.transport.flush());
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(port = %self.transport.path(), error = %e, "failed to send switch command");
                false
            }
        }
    }

    /// Sends a press or release for a key from the canonical table.
    pub fn send_key(&mut self, def: &KeyDefinition, action: KeyAction) -> bool {
        self.send(&SwitchCommand::for_key(def, action))
    }

    /// Closes the underlying port. Idempotent.
    pub fn close(&mut self) {
        self.transport.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::serial::mock::{mock_opener, port, MockScanner, MockTransport};
    use drinky_core::{KeyId, KeyTable};

    fn table() -> KeyTable {
        KeyTable::new().expect("static table must validate")
    }

    #[test]
    fn test_matches_identity_by_description_case_insensitive() {
        assert!(matches_identity(&port("/dev/ttyACM0", 0, 0, "Adafruit ItsyBitsy 32u4")));
        assert!(matches_identity(&port("/dev/ttyACM0", 0, 0, "ITSYBITSY")));
        assert!(!matches_identity(&port("/dev/ttyACM0", 0, 0, "Arduino Uno")));
    }

    #[test]
    fn test_matches_identity_by_vid_pid() {
        assert!(matches_identity(&port("/dev/ttyACM1", 0x239A, 0x8001, "generic CDC device")));
        assert!(!matches_identity(&port("/dev/ttyACM1", 0x239A, 0x8002, "generic CDC device")));
    }

    #[test]
    fn test_matches_identity_without_usb_metadata() {
        let info = PortInfo {
            path: "/dev/ttyS0".to_owned(),
            vid: None,
            pid: None,
            description: None,
        };
        assert!(!matches_identity(&info));
    }

    #[test]
    fn test_find_devices_skips_ports_that_fail_to_open() {
        // Arrange: two matching ports, one of which refuses to open.
        let scanner = MockScanner::with_ports(vec![
            port("/dev/ttyACM0", 0x239A, 0x8001, "ItsyBitsy 32u4"),
            port("/dev/ttyACM1", 0x239A, 0x8001, "ItsyBitsy 32u4"),
        ]);
        let (opener, _) = mock_opener(&["/dev/ttyACM0"]);

        // Act
        let sessions = find_devices(&scanner, opener);

        // Assert – the failed open is skipped, not fatal
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].port(), "/dev/ttyACM1");
    }

    #[test]
    fn test_find_devices_empty_scan_is_not_an_error() {
        let scanner = MockScanner::with_ports(Vec::new());
        let (opener, _) = mock_opener(&[]);
        assert!(find_devices(&scanner, opener).is_empty());
    }

    #[test]
    fn test_find_devices_survives_enumeration_failure() {
        let scanner = MockScanner::failing();
        let (opener, _) = mock_opener(&[]);
        assert!(find_devices(&scanner, opener).is_empty());
    }

    #[test]
    fn test_find_devices_scans_exactly_once_per_call() {
        let mut scanner = crate::infrastructure::serial::MockPortScanner::new();
        scanner
            .expect_scan()
            .times(1)
            .returning(|| Ok(vec![port("/dev/ttyACM0", 0x239A, 0x8001, "ItsyBitsy 32u4")]));
        let (opener, _) = mock_opener(&[]);

        let sessions = find_devices(&scanner, opener);
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_send_writes_one_flushed_frame() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let controls = transport.controls();
        let mut session = DeviceSession::new(transport);

        let table = table();
        let sent = session.send_key(table.get(KeyId::A), KeyAction::Press);

        assert!(sent);
        let written = controls.written();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].len(), 13);
        assert_eq!(written[0][12], 1);
        assert_eq!(controls.flush_count(), 1);
    }

    #[test]
    fn test_send_on_closed_session_returns_false_without_writing() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let controls = transport.controls();
        let mut session = DeviceSession::new(transport);
        session.close();

        let table = table();
        assert!(!session.send_key(table.get(KeyId::A), KeyAction::Press));
        assert!(controls.written().is_empty());
    }

    #[test]
    fn test_send_reports_write_failure_as_false() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let controls = transport.controls();
        controls.fail_writes();
        let mut session = DeviceSession::new(transport);

        let table = table();
        assert!(!session.send_key(table.get(KeyId::A), KeyAction::Press));
    }

    #[test]
    fn test_is_connected_skips_probe_within_heartbeat_interval() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let controls = transport.controls();
        let mut session =
            DeviceSession::with_heartbeat_interval(transport, Duration::from_secs(3600));

        assert!(session.is_connected());
        assert!(session.is_connected());
        assert_eq!(controls.probe_count(), 0);
    }

    #[test]
    fn test_is_connected_probes_after_heartbeat_interval() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let controls = transport.controls();
        let mut session = DeviceSession::with_heartbeat_interval(transport, Duration::ZERO);

        assert!(session.is_connected());
        assert!(controls.probe_count() >= 1);
    }

    #[test]
    fn test_failed_probe_marks_session_unresponsive() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let controls = transport.controls();
        controls.fail_probe();
        let mut session = DeviceSession::with_heartbeat_interval(transport, Duration::ZERO);

        assert!(!session.is_connected());
        assert!(!session.send(&SwitchCommand::for_key(
            table().get(KeyId::Space),
            KeyAction::Release,
        )));
        assert!(controls.written().is_empty());
    }

    #[test]
    fn test_close_is_idempotent() {
        let transport = MockTransport::new("/dev/ttyACM0");
        let mut session = DeviceSession::new(transport);
        session.close();
        session.close();
        assert!(!session.is_connected());
    }
}
