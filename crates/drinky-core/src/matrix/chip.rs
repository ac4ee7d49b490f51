//! Per-chip pin assignments and the row/column mapping of a key.

use serde::{Deserialize, Serialize};

use super::crossbar::{bus_pin_for, CrossbarPin};

/// I2C address of the crossbar chip driving the matrix rows.
///
/// The addresses are strapped in hardware; they are constants of the
/// board, not configuration.
pub const ROW_CHIP_ADDR: u8 = 0x70;

/// I2C address of the crossbar chip driving the matrix columns.
pub const COL_CHIP_ADDR: u8 = 0x71;

/// A key's connection point on one crossbar chip.
///
/// `logical_pin` is the firmware-facing pin number printed on the board
/// silkscreen; `crossbar` is the switch coordinate on the chip; `bus` is
/// the bus line the signal routes through to reach the other chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChipPin {
    chip_addr: u8,
    logical_pin: u8,
    crossbar: CrossbarPin,
    bus: CrossbarPin,
}

impl ChipPin {
    /// Creates a chip pin, deriving the bus pin from the crossbar pin's
    /// axis (the recommended path; see [`bus_pin_for`]).
    pub const fn new(chip_addr: u8, logical_pin: u8, crossbar: CrossbarPin) -> Self {
        Self {
            chip_addr,
            logical_pin,
            crossbar,
            bus: bus_pin_for(crossbar),
        }
    }

    /// Creates a chip pin with an explicitly supplied bus pin.
    ///
    /// Only decode paths use this; encoding always derives the bus pin.
    pub const fn with_bus(
        chip_addr: u8,
        logical_pin: u8,
        crossbar: CrossbarPin,
        bus: CrossbarPin,
    ) -> Self {
        Self { chip_addr, logical_pin, crossbar, bus }
    }

    pub const fn chip_addr(self) -> u8 {
        self.chip_addr
    }

    pub const fn logical_pin(self) -> u8 {
        self.logical_pin
    }

    pub const fn crossbar(self) -> CrossbarPin {
        self.crossbar
    }

    pub const fn bus(self) -> CrossbarPin {
        self.bus
    }
}

/// The full hardware location of one key: its row-chip pin and its
/// column-chip pin. Closing both crossbar switches actuates the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalMapping {
    pub row: ChipPin,
    pub col: ChipPin,
}
