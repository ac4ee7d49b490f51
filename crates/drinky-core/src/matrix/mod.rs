//! ADG2128 crossbar pin model.
//!
//! The board has two ADG2128 crossbar switch chips, one driving the matrix
//! rows and one driving the columns. Each chip exposes a 12×8 grid of
//! analog switches addressed by an X channel (0–11) and a Y channel (0–7).
//! One channel on each axis is reserved as a "bus" line that ties the two
//! chips together; every key routes through the bus pin on the axis
//! opposite its own.

mod chip;
mod crossbar;

pub use chip::{ChipPin, PhysicalMapping, COL_CHIP_ADDR, ROW_CHIP_ADDR};
pub use crossbar::{bus_pin_for, Axis, CrossbarPin, MatrixError, BUS_PIN_X, BUS_PIN_Y};
