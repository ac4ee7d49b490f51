//! Hardware-facing services: serial transport and device sessions.

pub mod device;
pub mod serial;
