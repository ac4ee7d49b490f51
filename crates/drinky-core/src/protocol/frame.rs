//! The 13-byte switch-command frame.
//!
//! Each key actuation is one fixed-size frame, big-endian with one byte
//! per field:
//!
//! ```text
//! offset  field
//!  0      row chip I2C address
//!  1      row logical pin
//!  2      row crossbar axis      (0 = X, 1 = Y)
//!  3      row crossbar channel
//!  4      row bus axis
//!  5      row bus channel
//!  6      col chip I2C address
//!  7      col logical pin
//!  8      col crossbar axis
//!  9      col crossbar channel
//! 10      col bus axis
//! 11      col bus channel
//! 12      action                 (1 = press, 0 = release)
//! ```
//!
//! There is no delimiter, length prefix, or checksum; the firmware reads
//! in fixed 13-byte chunks. Decoding exists for tests and diagnostics —
//! the device itself only ever receives encoded frames.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keymap::KeyDefinition;
use crate::matrix::{Axis, ChipPin, CrossbarPin, MatrixError, COL_CHIP_ADDR, ROW_CHIP_ADDR};

/// Exact size of an encoded switch command.
pub const COMMAND_LEN: usize = 13;

/// Errors produced while decoding a switch-command frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The buffer is shorter than a full frame.
    #[error("insufficient data: needed {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A chip-address byte does not match the strapped hardware address
    /// for its position in the frame.
    #[error("invalid chip address {value:#04x} at offset {offset} (expected {expected:#04x})")]
    InvalidChipAddress { offset: usize, value: u8, expected: u8 },

    /// An axis byte is neither 0 (X) nor 1 (Y).
    #[error("invalid axis byte {value} at offset {offset}")]
    InvalidAxis { offset: usize, value: u8 },

    /// A channel byte is out of range for its axis.
    #[error("invalid channel at offset {offset}: {source}")]
    InvalidChannel {
        offset: usize,
        #[source]
        source: MatrixError,
    },

    /// The action byte is neither 0 (release) nor 1 (press).
    #[error("invalid action byte {value}")]
    InvalidAction { value: u8 },
}

/// Whether a switch command closes or opens the key's crossbar switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
}

impl KeyAction {
    pub const fn wire_value(self) -> u8 {
        match self {
            KeyAction::Press => 1,
            KeyAction::Release => 0,
        }
    }

    pub const fn from_wire(byte: u8) -> Option<KeyAction> {
        match byte {
            1 => Some(KeyAction::Press),
            0 => Some(KeyAction::Release),
            _ => None,
        }
    }
}

/// One key actuation: the row pin, the column pin, and the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCommand {
    pub row: ChipPin,
    pub col: ChipPin,
    pub action: KeyAction,
}

impl SwitchCommand {
    /// Builds the command for a key from the canonical table.
    pub fn for_key(def: &KeyDefinition, action: KeyAction) -> Self {
        let mapping = def.mapping();
        Self { row: mapping.row, col: mapping.col, action }
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encodes a switch command into its 13-byte wire frame.
pub fn encode_command(command: &SwitchCommand) -> [u8; COMMAND_LEN] {
    let mut frame = [0u8; COMMAND_LEN];
    write_chip_pin(&mut frame[0..6], command.row);
    write_chip_pin(&mut frame[6..12], command.col);
    frame[12] = command.action.wire_value();
    frame
}

fn write_chip_pin(out: &mut [u8], pin: ChipPin) {
    out[0] = pin.chip_addr();
    out[1] = pin.logical_pin();
    out[2] = pin.crossbar().axis().wire_value();
    out[3] = pin.crossbar().channel();
    out[4] = pin.bus().axis().wire_value();
    out[5] = pin.bus().channel();
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decodes a 13-byte frame back into a [`SwitchCommand`], validating every
/// field against the hardware model.
pub fn decode_command(bytes: &[u8]) -> Result<SwitchCommand, ProtocolError> {
    if bytes.len() < COMMAND_LEN {
        return Err(ProtocolError::InsufficientData {
            needed: COMMAND_LEN,
            available: bytes.len(),
        });
    }

    let row = read_chip_pin(bytes, 0, ROW_CHIP_ADDR)?;
    let col = read_chip_pin(bytes, 6, COL_CHIP_ADDR)?;
    let action = KeyAction::from_wire(bytes[12])
        .ok_or(ProtocolError::InvalidAction { value: bytes[12] })?;

    Ok(SwitchCommand { row, col, action })
}

fn read_chip_pin(bytes: &[u8], offset: usize, expected_addr: u8) -> Result<ChipPin, ProtocolError> {
    let chip_addr = bytes[offset];
    if chip_addr != expected_addr {
        return Err(ProtocolError::InvalidChipAddress {
            offset,
            value: chip_addr,
            expected: expected_addr,
        });
    }

    let logical_pin = bytes[offset + 1];
    let crossbar = read_crossbar_pin(bytes, offset + 2)?;
    let bus = read_crossbar_pin(bytes, offset + 4)?;

    Ok(ChipPin::with_bus(chip_addr, logical_pin, crossbar, bus))
}

fn read_crossbar_pin(bytes: &[u8], offset: usize) -> Result<CrossbarPin, ProtocolError> {
    let axis = Axis::from_wire(bytes[offset])
        .ok_or(ProtocolError::InvalidAxis { offset, value: bytes[offset] })?;
    CrossbarPin::new(axis, bytes[offset + 1])
        .map_err(|source| ProtocolError::InvalidChannel { offset: offset + 1, source })
}
