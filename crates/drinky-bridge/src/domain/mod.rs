//! Domain types for the bridge service.

pub mod config;
