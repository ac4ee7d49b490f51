//! Turns client key events into switch commands.
//!
//! Clients send DOM `KeyboardEvent.code` strings with a down/up kind.
//! Modifiers are held for as long as the client holds them; every other
//! key is actuated as a press/release tap on key-down, because the
//! current hardware design has no use for holding a plain key.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use drinky_core::{canonical_modifier, KeyAction, KeyId, KeyTable, KeymapError};

use crate::infrastructure::device::DeviceSession;
use crate::infrastructure::serial::SerialTransport;

/// Pause between the press and release of a tap, and again after the
/// release, so the firmware never sees back-to-back transitions.
pub const TAP_DELAY: Duration = Duration::from_millis(20);

/// Direction of a client key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
}

/// What the handler did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// A non-modifier key-down was actuated as press + release.
    Tapped { id: KeyId },
    /// A modifier was pressed or released and the tracked set updated.
    ModifierUpdated { id: KeyId, pressed: bool },
    /// Non-modifier key-up events send nothing by design.
    IgnoredKeyUp { id: KeyId },
    /// The code string matched nothing in the table. Recoverable.
    UnknownCode,
    /// A send failed; the device is gone and the session should be
    /// recycled by the manager.
    Disconnected,
}

/// Stateful event handler: owns the key table and the set of modifier
/// codes currently held by the client.
pub struct InputHandler {
    table: KeyTable,
    active_modifiers: HashSet<String>,
}

impl InputHandler {
    /// Builds the handler, validating the key table.
    ///
    /// Table validation failure is a data bug; callers treat it as fatal
    /// at startup.
    pub fn new() -> Result<Self, KeymapError> {
        Ok(Self {
            table: KeyTable::new()?,
            active_modifiers: HashSet::new(),
        })
    }

    pub fn table(&self) -> &KeyTable {
        &self.table
    }

    /// The modifier codes currently held, in no particular order.
    pub fn active_modifiers(&self) -> Vec<&str> {
        self.active_modifiers.iter().map(String::as_str).collect()
    }

    /// Handles one client key event against the given session.
    pub fn handle<T: SerialTransport>(
        &mut self,
        session: &mut DeviceSession<T>,
        code: &str,
        kind: KeyEventKind,
    ) -> InputOutcome {
        if let Some(id) = canonical_modifier(code) {
            return self.handle_modifier(session, code, id, kind);
        }

        let Some(def) = self.table.resolve(code) else {
            debug!(code, "no matching key for client code");
            return InputOutcome::UnknownCode;
        };

        // Key-up for plain keys is a no-op: the tap below already released
        // the switch.
        if kind == KeyEventKind::Up {
            return InputOutcome::IgnoredKeyUp { id: def.id() };
        }

        let id = def.id();
        if !session.send_key(def, KeyAction::Press) {
            return InputOutcome::Disconnected;
        }
        thread::sleep(TAP_DELAY);
        if !session.send_key(def, KeyAction::Release) {
            return InputOutcome::Disconnected;
        }
        thread::sleep(TAP_DELAY);

        info!(code, key = ?id, "tapped key");
        InputOutcome::Tapped { id }
    }

    fn handle_modifier<T: SerialTransport>(
        &mut self,
        session: &mut DeviceSession<T>,
        code: &str,
        id: KeyId,
        kind: KeyEventKind,
    ) -> InputOutcome {
        let (action, pressed) = match kind {
            KeyEventKind::Down => (KeyAction::Press, true),
            KeyEventKind::Up => (KeyAction::Release, false),
        };

        if pressed {
            self.active_modifiers.insert(code.to_owned());
        } else {
            self.active_modifiers.remove(code);
        }

        let def = self.table.get(id);
        if !session.send_key(def, action) {
            return InputOutcome::Disconnected;
        }

        debug!(code, key = ?id, pressed, held = self.active_modifiers.len(), "modifier updated");
        InputOutcome::ModifierUpdated { id, pressed }
    }
}
