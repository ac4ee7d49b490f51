//! # drinky-core
//!
//! Shared library for the Drinky Board controller containing the crossbar
//! pin model, the canonical key mapping table, and the serial wire codec.
//!
//! The Drinky Board is a real keyboard whose switch matrix is driven
//! electronically: two ADG2128 analog crossbar chips (one per matrix axis)
//! sit between the key grid and a microcontroller, and closing a pair of
//! crossbar switches is electrically identical to pressing the physical key.
//! This crate models that hardware and produces the exact byte frames the
//! microcontroller firmware consumes.
//!
//! It has zero dependencies on OS APIs, serial ports, or async runtimes.
//! The serial transport and device session live in `drinky-bridge`.
//!
//! - **`matrix`** – The ADG2128 crossbar pin model: axes, channel ranges,
//!   bus-pin routing, and the per-chip physical mapping of each key.
//!
//! - **`keymap`** – The canonical key table: every physical key on the
//!   board, its row/column pin assignments, and the client-side code
//!   strings that resolve to it.
//!
//! - **`protocol`** – The 13-byte command frame sent to the
//!   microcontroller for each press or release.

pub mod keymap;
pub mod matrix;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `drinky_core::KeyTable` instead of `drinky_core::keymap::KeyTable`.
pub use keymap::{canonical_modifier, KeyDefinition, KeyId, KeyTable, KeymapError};
pub use matrix::{
    bus_pin_for, Axis, ChipPin, CrossbarPin, MatrixError, PhysicalMapping, BUS_PIN_X, BUS_PIN_Y,
    COL_CHIP_ADDR, ROW_CHIP_ADDR,
};
pub use protocol::{
    decode_command, encode_command, KeyAction, ProtocolError, SwitchCommand, COMMAND_LEN,
};
