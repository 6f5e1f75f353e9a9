//! Bridge configuration

use std::time::Duration;
use tracing::warn;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "SPIRE_RL_PORT";

/// Default listen port
pub const DEFAULT_PORT: u16 = 9999;

/// Default minimum interval between two snapshot emissions
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(3000);

/// Default bound on one inbound frame
pub const DEFAULT_MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Configuration for the bridge engine
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// TCP listen port; 0 binds an ephemeral port
    pub port: u16,
    /// Minimum interval between snapshot emissions
    pub sample_interval: Duration,
    /// Maximum accepted inbound frame length in bytes
    pub max_frame_len: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

impl BridgeConfig {
    /// Build a config applying the `SPIRE_RL_PORT` override
    ///
    /// A malformed override falls back to the default port.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(PORT_ENV) {
            match raw.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => {
                    warn!("invalid {PORT_ENV}={raw:?}, using default port {DEFAULT_PORT}");
                }
            }
        }
        config
    }
}
