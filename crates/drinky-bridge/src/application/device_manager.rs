//! Background lifecycle management for the device session.
//!
//! The manager holds at most one session. Its `tick()` is driven from the
//! service loop and does two time-gated jobs: while connected, periodic
//! health checks; while disconnected, periodic rescans that adopt the
//! first discovered controller and close any extras.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::infrastructure::device::{find_devices, DeviceSession};
use crate::infrastructure::serial::{PortInfo, PortScanner, SerialTransport, TransportError};

/// How often a live session is health-checked.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// How often discovery is retried while no device is connected.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(2);

pub struct DeviceManager<T: SerialTransport> {
    session: Option<DeviceSession<T>>,
    // None means "due now"; the first tick acts immediately.
    last_health_check: Option<Instant>,
    last_scan: Option<Instant>,
    health_check_interval: Duration,
    scan_interval: Duration,
    // Applied to newly adopted sessions; None keeps the session default.
    heartbeat_interval: Option<Duration>,
}

impl<T: SerialTransport> DeviceManager<T> {
    pub fn new() -> Self {
        Self::with_intervals(HEALTH_CHECK_INTERVAL, SCAN_INTERVAL)
    }

    pub fn with_intervals(health_check_interval: Duration, scan_interval: Duration) -> Self {
        Self {
            session: None,
            last_health_check: None,
            last_scan: None,
            health_check_interval,
            scan_interval,
            heartbeat_interval: None,
        }
    }

    /// Overrides the heartbeat interval applied to adopted sessions.
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = Some(interval);
        self
    }

    /// The current session, if a device is adopted.
    pub fn session_mut(&mut self) -> Option<&mut DeviceSession<T>> {
        self.session.as_mut()
    }

    /// Whether a device is currently adopted and believed responsive.
    pub fn is_connected(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) => session.is_connected(),
            None => false,
        }
    }

    /// One pass of the lifecycle loop.
    pub fn tick<S, F>(&mut self, scanner: &S, opener: &mut F)
    where
        S: PortScanner,
        F: FnMut(&PortInfo) -> Result<T, TransportError>,
    {
        if self.session.is_some() {
            self.health_check();
        } else {
            self.rescan(scanner, opener);
        }
    }

    /// Closes and drops the session, if any.
    pub fn shutdown(&mut self) {
        if let Some(mut session) = self.session.take() {
            info!(port = session.port(), "closing device session");
            session.close();
        }
    }

    fn health_check(&mut self) {
        if !due(self.last_health_check, self.health_check_interval) {
            return;
        }
        self.last_health_check = Some(Instant::now());

        let alive = match self.session.as_mut() {
            Some(session) => session.is_connected(),
            None => return,
        };
        if !alive {
            if let Some(mut session) = self.session.take() {
                warn!(port = session.port(), "device unresponsive; dropping session");
                session.close();
            }
        }
    }

    fn rescan<S, F>(&mut self, scanner: &S, opener: &mut F)
    where
        S: PortScanner,
        F: FnMut(&PortInfo) -> Result<T, TransportError>,
    {
        if !due(self.last_scan, self.scan_interval) {
            return;
        }
        self.last_scan = Some(Instant::now());

        let mut found = find_devices(scanner, |info| opener(info));
        if found.is_empty() {
            return;
        }

        // One board, one session: adopt the first port and close the rest
        // (the same device can enumerate more than once mid-replug).
        let mut session = found.remove(0);
        if let Some(interval) = self.heartbeat_interval {
            session.set_heartbeat_interval(interval);
        }
        info!(port = session.port(), "connected to device");
        for mut extra in found {
            info!(port = extra.port(), "closing extra discovered device");
            extra.close();
        }
        self.session = Some(session);
    }
}

impl<T: SerialTransport> Default for DeviceManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn due(last: Option<Instant>, interval: Duration) -> bool {
    match last {
        Some(instant) => instant.elapsed() >= interval,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::serial::mock::{mock_opener, port, MockScanner};

    fn itsy_ports(n: usize) -> Vec<PortInfo> {
        (0..n)
            .map(|i| port(&format!("/dev/ttyACM{i}"), 0x239A, 0x8001, "ItsyBitsy 32u4"))
            .collect()
    }

    #[test]
    fn test_first_tick_adopts_first_device_and_closes_extras() {
        // Arrange
        let scanner = MockScanner::with_ports(itsy_ports(3));
        let (mut opener, opened) = mock_opener(&[]);
        let mut manager = DeviceManager::new();

        // Act
        manager.tick(&scanner, &mut opener);

        // Assert
        let opened = opened.lock().unwrap();
        assert_eq!(opened.len(), 3);
        assert_eq!(
            manager.session_mut().map(|s| s.port().to_owned()),
            Some("/dev/ttyACM0".to_owned())
        );
        assert!(!opened[0].1.is_closed());
        assert!(opened[1].1.is_closed());
        assert!(opened[2].1.is_closed());
    }

    #[test]
    fn test_rescan_is_gated_by_scan_interval() {
        let scanner = MockScanner::with_ports(Vec::new());
        let (mut opener, _) = mock_opener(&[]);
        let mut manager: DeviceManager<_> =
            DeviceManager::with_intervals(HEALTH_CHECK_INTERVAL, Duration::from_secs(3600));

        // First tick scans (nothing found); second is inside the interval
        // and must not scan again. The mock can't count scans directly,
        // so gate on a scanner that would now return a device.
        manager.tick(&scanner, &mut opener);
        let scanner = MockScanner::with_ports(itsy_ports(1));
        manager.tick(&scanner, &mut opener);

        assert!(!manager.is_connected());
    }

    #[test]
    fn test_unresponsive_device_is_dropped_then_rediscovered() {
        let scanner = MockScanner::with_ports(itsy_ports(1));
        let (mut opener, opened) = mock_opener(&[]);
        let mut manager = DeviceManager::with_intervals(Duration::ZERO, Duration::ZERO);

        // Adopt.
        manager.tick(&scanner, &mut opener);
        assert!(manager.is_connected());

        // Break the device. A closed port is detected immediately, without
        // waiting out the heartbeat interval.
        manager
            .session_mut()
            .expect("session adopted")
            .close();
        manager.tick(&scanner, &mut opener);
        assert!(manager.session_mut().is_none());

        // And the tick after that rediscovers.
        manager.tick(&scanner, &mut opener);
        assert!(manager.session_mut().is_some());
        assert_eq!(opened.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_shutdown_closes_the_session() {
        let scanner = MockScanner::with_ports(itsy_ports(1));
        let (mut opener, opened) = mock_opener(&[]);
        let mut manager = DeviceManager::new();

        manager.tick(&scanner, &mut opener);
        manager.shutdown();

        assert!(manager.session_mut().is_none());
        assert!(opened.lock().unwrap()[0].1.is_closed());
    }

    #[test]
    fn test_tick_with_no_devices_stays_disconnected() {
        let scanner = MockScanner::with_ports(Vec::new());
        let (mut opener, _) = mock_opener(&[]);
        let mut manager: DeviceManager<_> =
            DeviceManager::with_intervals(Duration::ZERO, Duration::ZERO);

        manager.tick(&scanner, &mut opener);
        manager.tick(&scanner, &mut opener);

        assert!(!manager.is_connected());
    }
}
