//! End-to-end lifecycle tests over the mock serial layer: discovery,
//! adoption, event handling, loss, and re-adoption.

use std::time::Duration;

use drinky_bridge::application::{DeviceManager, InputHandler, InputOutcome, KeyEventKind};
use drinky_bridge::infrastructure::serial::mock::{mock_opener, port, MockScanner};
use drinky_core::{decode_command, KeyAction, KeyId};

fn itsy(path: &str) -> drinky_bridge::PortInfo {
    port(path, 0x239A, 0x8001, "Adafruit ItsyBitsy 32u4")
}

#[test]
fn full_session_lifecycle_from_discovery_to_reconnect() {
    let (mut opener, opened) = mock_opener(&[]);
    let mut manager = DeviceManager::with_intervals(Duration::ZERO, Duration::ZERO);
    let mut handler = InputHandler::new().expect("table must validate");

    // Nothing plugged in: ticks are a no-op.
    let scanner = MockScanner::with_ports(Vec::new());
    manager.tick(&scanner, &mut opener);
    assert!(!manager.is_connected());

    // Board appears twice in the port list; adopt one, close the other.
    let scanner = MockScanner::with_ports(vec![itsy("/dev/ttyACM0"), itsy("/dev/ttyACM1")]);
    manager.tick(&scanner, &mut opener);
    assert!(manager.is_connected());
    {
        let opened = opened.lock().unwrap();
        assert_eq!(opened.len(), 2);
        assert!(opened[1].1.is_closed());
    }

    // Type through the adopted session.
    let session = manager.session_mut().expect("connected");
    let outcome = handler.handle(session, "ShiftLeft", KeyEventKind::Down);
    assert_eq!(
        outcome,
        InputOutcome::ModifierUpdated { id: KeyId::LeftShift, pressed: true }
    );
    let outcome = handler.handle(session, "KeyA", KeyEventKind::Down);
    assert_eq!(outcome, InputOutcome::Tapped { id: KeyId::A });

    // Shift press, then A press + release: three frames on the wire.
    let frames = opened.lock().unwrap()[0].1.written();
    assert_eq!(frames.len(), 3);
    let actions: Vec<KeyAction> = frames
        .iter()
        .map(|f| decode_command(f).expect("valid frame").action)
        .collect();
    assert_eq!(
        actions,
        vec![KeyAction::Press, KeyAction::Press, KeyAction::Release]
    );

    // Yank the board: writes fail, handler reports disconnected, the
    // manager drops the session on its next tick.
    opened.lock().unwrap()[0].1.fail_writes();
    let session = manager.session_mut().expect("still adopted");
    let outcome = handler.handle(session, "KeyB", KeyEventKind::Down);
    assert_eq!(outcome, InputOutcome::Disconnected);

    manager.session_mut().expect("still adopted").close();
    manager.tick(&scanner, &mut opener);
    assert!(manager.session_mut().is_none());

    // Replug: the next tick rediscovers and adopts a fresh session.
    manager.tick(&scanner, &mut opener);
    assert!(manager.is_connected());
    assert!(opened.lock().unwrap().len() > 2);
}

#[test]
fn keyup_events_and_unknown_codes_never_touch_the_wire() {
    let (mut opener, opened) = mock_opener(&[]);
    let mut manager = DeviceManager::with_intervals(Duration::ZERO, Duration::ZERO);
    let mut handler = InputHandler::new().expect("table must validate");

    let scanner = MockScanner::with_ports(vec![itsy("/dev/ttyACM0")]);
    manager.tick(&scanner, &mut opener);
    let session = manager.session_mut().expect("connected");

    assert_eq!(
        handler.handle(session, "KeyQ", KeyEventKind::Up),
        InputOutcome::IgnoredKeyUp { id: KeyId::Q }
    );
    assert_eq!(
        handler.handle(session, "MediaPlayPause", KeyEventKind::Down),
        InputOutcome::UnknownCode
    );

    assert!(opened.lock().unwrap()[0].1.written().is_empty());
}

#[test]
fn non_matching_ports_are_never_opened() {
    let (mut opener, opened) = mock_opener(&[]);
    let mut manager = DeviceManager::with_intervals(Duration::ZERO, Duration::ZERO);

    let scanner = MockScanner::with_ports(vec![
        port("/dev/ttyUSB0", 0x2341, 0x0043, "Arduino Uno"),
        port("/dev/ttyS0", 0, 0, "16550A UART"),
    ]);
    manager.tick(&scanner, &mut opener);

    assert!(!manager.is_connected());
    assert!(opened.lock().unwrap().is_empty());
}
