//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use medibook_core::{BookingCore, MedibookResult};

/// Sentinel database path for a throwaway in-memory store.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Parser)]
#[command(name = "medibook-server", version, about = "Hospital appointment booking API")]
pub struct Config {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "MEDIBOOK_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// SQLite database file, or `:memory:`.
    #[arg(long, env = "MEDIBOOK_DATABASE", default_value = "medibook.db")]
    pub database: String,

    /// Requests running longer than this are answered with 408.
    #[arg(long, env = "MEDIBOOK_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Base URL registration QR codes are served from.
    #[arg(long, env = "MEDIBOOK_QR_BASE_URL")]
    pub qr_base_url: Option<String>,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn open_core(&self) -> MedibookResult<BookingCore> {
        let core = if self.database == IN_MEMORY {
            BookingCore::open_in_memory()?
        } else {
            BookingCore::open(&self.database)?
        };
        Ok(core.with_qr_base_url(self.qr_base_url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "medibook-server",
            "--bind",
            "127.0.0.1:9000",
            "--database",
            ":memory:",
            "--request-timeout-secs",
            "5",
            "--qr-base-url",
            "https://cdn.example.com/qr",
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.qr_base_url.as_deref(), Some("https://cdn.example.com/qr"));
        assert!(config.open_core().is_ok());
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        assert!(Config::try_parse_from(["medibook-server", "--bind", "not-an-address"]).is_err());
    }
}
