//! Mock serial transport and port scanner for unit testing.
//!
//! Allows tests to script discovery results, capture written frames, and
//! inject transport failures without a USB device plugged in.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::{PortInfo, PortScanner, SerialTransport, TransportError};

#[derive(Debug, Default)]
struct MockState {
    written: Vec<Vec<u8>>,
    flush_count: u32,
    probe_count: u32,
    closed: bool,
    fail_writes: bool,
    fail_probe: bool,
}

/// A mock implementation of [`SerialTransport`] backed by shared state.
///
/// The transport itself is handed to a `DeviceSession`; keep a
/// [`MockControls`] handle to inspect and steer it from the test.
pub struct MockTransport {
    path: String,
    state: Arc<Mutex<MockState>>,
}

/// Test-side handle onto a [`MockTransport`]'s shared state.
#[derive(Clone)]
pub struct MockControls {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Returns a handle for inspecting this transport after it has been
    /// moved into a session.
    pub fn controls(&self) -> MockControls {
        MockControls { state: Arc::clone(&self.state) }
    }
}

impl MockControls {
    /// Every frame written so far, in order.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state.lock().expect("lock poisoned").written.clone()
    }

    pub fn flush_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").flush_count
    }

    /// Number of times the liveness probe was consulted.
    pub fn probe_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").probe_count
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().expect("lock poisoned").closed
    }

    /// Makes subsequent writes fail, as if the cable was yanked mid-send.
    pub fn fail_writes(&self) {
        self.state.lock().expect("lock poisoned").fail_writes = true;
    }

    /// Makes the liveness probe fail, as if the device stopped responding.
    pub fn fail_probe(&self) {
        self.state.lock().expect("lock poisoned").fail_probe = true;
    }
}

impl SerialTransport for MockTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.closed {
            return Err(TransportError::Closed(self.path.clone()));
        }
        if state.fail_writes {
            return Err(TransportError::Write(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock write failure",
            )));
        }
        state.written.push(bytes.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.closed {
            return Err(TransportError::Closed(self.path.clone()));
        }
        state.flush_count += 1;
        Ok(())
    }

    fn bytes_to_read(&self) -> Result<u32, TransportError> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.probe_count += 1;
        if state.closed {
            return Err(TransportError::Closed(self.path.clone()));
        }
        if state.fail_probe {
            return Err(TransportError::Probe(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "mock device unplugged",
            )));
        }
        Ok(0)
    }

    fn is_open(&self) -> bool {
        !self.state.lock().expect("lock poisoned").closed
    }

    fn close(&mut self) {
        self.state.lock().expect("lock poisoned").closed = true;
    }

    fn path(&self) -> &str {
        &self.path
    }
}

/// A mock [`PortScanner`] that reports a scripted port list.
#[derive(Default)]
pub struct MockScanner {
    ports: Vec<PortInfo>,
    fail: bool,
}

impl MockScanner {
    pub fn with_ports(ports: Vec<PortInfo>) -> Self {
        Self { ports, fail: false }
    }

    /// A scanner whose scan call itself fails.
    pub fn failing() -> Self {
        Self { ports: Vec::new(), fail: true }
    }
}

impl PortScanner for MockScanner {
    fn scan(&self) -> Result<Vec<PortInfo>, TransportError> {
        if self.fail {
            return Err(TransportError::Enumerate(serialport::Error::new(
                serialport::ErrorKind::Unknown,
                "mock enumeration failure",
            )));
        }
        Ok(self.ports.clone())
    }
}

/// Builds an opener closure that hands out mock transports and records
/// the controls for each opened path. Paths listed in `fail_paths` refuse
/// to open.
pub fn mock_opener(
    fail_paths: &[&str],
) -> (
    impl FnMut(&PortInfo) -> Result<MockTransport, TransportError>,
    Arc<Mutex<Vec<(String, MockControls)>>>,
) {
    let fail: HashSet<String> = fail_paths.iter().map(|p| (*p).to_owned()).collect();
    let opened: Arc<Mutex<Vec<(String, MockControls)>>> = Arc::new(Mutex::new(Vec::new()));
    let opened_handle = Arc::clone(&opened);

    let opener = move |info: &PortInfo| {
        if fail.contains(&info.path) {
            return Err(TransportError::Open {
                path: info.path.clone(),
                source: serialport::Error::new(serialport::ErrorKind::NoDevice, "mock open failure"),
            });
        }
        let transport = MockTransport::new(&info.path);
        opened_handle
            .lock()
            .expect("lock poisoned")
            .push((info.path.clone(), transport.controls()));
        Ok(transport)
    };

    (opener, opened)
}

/// Convenience for building a [`PortInfo`] in tests.
pub fn port(path: &str, vid: u16, pid: u16, description: &str) -> PortInfo {
    PortInfo {
        path: path.to_owned(),
        vid: Some(vid),
        pid: Some(pid),
        description: Some(description.to_owned()),
    }
}
