//! Serial wire protocol between the backend and the controller firmware.

mod frame;

pub use frame::{
    decode_command, encode_command, KeyAction, ProtocolError, SwitchCommand, COMMAND_LEN,
};
