//! Process settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use snapmate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Listener and database settings, read from `SNAPMATE_*` variables,
/// configuration files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SNAPMATE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server uses in-memory stores.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub db_pool_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw}: {err}"),
            )
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let mut config = PoolConfig::new(url);
        if let Some(size) = self.db_pool_size {
            config = config.with_max_size(size);
        }
        if let Some(secs) = self.db_connect_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 5] = [
        "SNAPMATE_BIND_ADDR",
        "SNAPMATE_DATABASE_URL",
        "SNAPMATE_DB_POOL_SIZE",
        "SNAPMATE_DB_CONNECT_TIMEOUT_SECS",
        "SNAPMATE_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("snapmate")]).expect("config should load")
    }

    #[rstest]
    fn defaults_run_without_a_database() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(!settings.run_migrations);
        assert!(settings.pool_config().is_none());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SNAPMATE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "SNAPMATE_DATABASE_URL",
                Some("postgres://localhost/snapmate".to_owned()),
            ),
            ("SNAPMATE_DB_POOL_SIZE", Some("4".to_owned())),
            ("SNAPMATE_DB_CONNECT_TIMEOUT_SECS", None),
            ("SNAPMATE_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.run_migrations);
        let pool = settings.pool_config().expect("pool configured");
        assert_eq!(pool.database_url(), "postgres://localhost/snapmate");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(
            settings.bind_addr().expect("address"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_url: None,
            db_pool_size: None,
            db_connect_timeout_secs: None,
            run_migrations: false,
        };
        let err = settings.bind_addr().expect_err("invalid");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
