//! Service configuration, loaded from a TOML file.
//!
//! Every field has a default matching the board's shipped tuning, so an
//! absent file or an empty table is fully usable. A file that exists but
//! fails to parse is an error; silently running with defaults after a
//! typo would be worse than refusing to start.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An interval field is zero, negative, or not finite.
    #[error("invalid interval for {field}: {value}")]
    InvalidInterval { field: &'static str, value: f64 },
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Baud rate of the controller's CDC serial link.
    pub baud_rate: u32,
    /// Port read timeout in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baud_rate: 115_200, read_timeout_ms: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Minimum seconds between liveness probes on a live session.
    pub heartbeat_interval_secs: f64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { heartbeat_interval_secs: 5.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Seconds between health checks while a device is connected.
    pub health_check_interval_secs: f64,
    /// Seconds between discovery scans while no device is connected.
    pub scan_interval_secs: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { health_check_interval_secs: 1.0, scan_interval_secs: 2.0 }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub serial: SerialConfig,
    pub device: DeviceConfig,
    pub manager: ManagerConfig,
}

impl BridgeConfig {
    /// Rejects non-positive or non-finite intervals up front, before any
    /// of them reaches a `Duration` constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("device.heartbeat_interval_secs", self.device.heartbeat_interval_secs),
            ("manager.health_check_interval_secs", self.manager.health_check_interval_secs),
            ("manager.scan_interval_secs", self.manager.scan_interval_secs),
        ];
        for (field, value) in intervals {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidInterval { field, value });
            }
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.read_timeout_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs_f64(self.device.heartbeat_interval_secs)
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs_f64(self.manager.health_check_interval_secs)
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs_f64(self.manager.scan_interval_secs)
    }
}

/// Loads configuration from `path`.
///
/// A missing file yields the defaults; any other I/O or parse failure is
/// an error.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no config file; using defaults");
            return Ok(BridgeConfig::default());
        }
        Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
    };

    let config: BridgeConfig = toml::from_str(&raw)?;
    config.validate()?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_tuning() {
        let config = BridgeConfig::default();
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.read_timeout(), Duration::from_millis(1));
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(5));
        assert_eq!(config.health_check_interval(), Duration::from_secs(1));
        assert_eq!(config.scan_interval(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: BridgeConfig = toml::from_str("").expect("empty config must parse");
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [serial]
            baud_rate = 57600

            [manager]
            scan_interval_secs = 0.5
            "#,
        )
        .expect("config must parse");

        assert_eq!(config.serial.baud_rate, 57_600);
        assert_eq!(config.serial.read_timeout_ms, 1);
        assert_eq!(config.manager.scan_interval_secs, 0.5);
        assert_eq!(config.manager.health_check_interval_secs, 1.0);
    }

    #[test]
    fn test_unknown_field_is_tolerated() {
        // Forward compatibility: an old binary with a newer file should
        // still start.
        let parsed: Result<BridgeConfig, _> = toml::from_str(
            r#"
            [serial]
            baud_rate = 115200
            future_field = true
            "#,
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = BridgeConfig::default();
        config.manager.scan_interval_secs = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInterval { field: "manager.scan_interval_secs", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_heartbeat() {
        let mut config = BridgeConfig::default();
        config.device.heartbeat_interval_secs = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let parsed: Result<BridgeConfig, _> = toml::from_str("[serial\nbaud_rate = 1");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/drinky.toml"))
            .expect("missing file must not be an error");
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = BridgeConfig::default();
        config.serial.baud_rate = 9600;
        let raw = toml::to_string(&config).expect("serialize");
        let reparsed: BridgeConfig = toml::from_str(&raw).expect("reparse");
        assert_eq!(reparsed, config);
    }
}
