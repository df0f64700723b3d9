//! Application configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Interface the status server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// HTTP server port for the status pages.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prometheus exporter port. The exporter is disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    // === Cluster State ===
    /// JSON file to seed the in-memory cluster state from.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    7777
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            metrics_port: None,
            snapshot_path: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if let Some(metrics_port) = self.metrics_port {
            if metrics_port == 0 {
                return Err("METRICS_PORT must be non-zero".to_string());
            }
            if metrics_port == self.port {
                return Err("METRICS_PORT must differ from PORT".to_string());
            }
        }

        Ok(())
    }

    /// Address the status server listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Address the metrics exporter listens on, if enabled.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_port
            .map(|port| SocketAddr::new(self.bind_address, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:7777");
        assert!(config.metrics_addr().is_none());
        assert_eq!(config.rust_log, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let config = Config {
            port: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_metrics_port_clash() {
        let config = Config {
            metrics_port: Some(7777),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_from_env_style_pairs() {
        let vars = vec![
            ("PORT".to_string(), "8000".to_string()),
            ("METRICS_PORT".to_string(), "9000".to_string()),
            ("SNAPSHOT_PATH".to_string(), "/tmp/cluster.json".to_string()),
        ];

        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.metrics_addr().unwrap().to_string(), "0.0.0.0:9000");
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/cluster.json")));
    }
}
