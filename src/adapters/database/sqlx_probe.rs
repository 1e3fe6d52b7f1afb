//! SqlxDependencyProbe - connect-and-close check against MySQL or PostgreSQL.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tokio::time;
use tracing::debug;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::domain::startup::ProbeOutcome;
use crate::ports::DependencyProbe;

/// Probes the configured datastore with a single short-lived connection.
///
/// No pool is created. The connection is closed on success; on every other
/// path it is dropped, which releases the socket.
pub struct SqlxDependencyProbe {
    config: DatabaseConfig,
}

impl SqlxDependencyProbe {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn mysql_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.effective_port())
            .username(&self.config.user)
            .password(self.config.password.expose_secret())
            .database(&self.config.name)
    }

    fn postgres_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.effective_port())
            .username(&self.config.user)
            .password(self.config.password.expose_secret())
            .database(&self.config.name)
    }

    async fn attempt(&self) -> Result<(), sqlx::Error> {
        match self.config.backend {
            DatabaseBackend::Mysql => {
                connect_and_close::<MySqlConnection>(&self.mysql_options()).await
            }
            DatabaseBackend::Postgres => {
                connect_and_close::<PgConnection>(&self.postgres_options()).await
            }
        }
    }
}

/// Open one connection, ping it, then close it.
async fn connect_and_close<C: Connection>(options: &C::Options) -> Result<(), sqlx::Error> {
    let mut conn = C::connect_with(options).await?;
    let pinged = conn.ping().await;
    let closed = conn.close().await;
    pinged.and(closed)
}

#[async_trait]
impl DependencyProbe for SqlxDependencyProbe {
    async fn probe(&self) -> ProbeOutcome {
        let timeout: Duration = self.config.connect_timeout();
        debug!(target_db = %self.target(), timeout_secs = timeout.as_secs(), "Probing database");

        match time::timeout(timeout, self.attempt()).await {
            Ok(Ok(())) => ProbeOutcome::Connected,
            Ok(Err(err)) => ProbeOutcome::Failed(err.to_string()),
            Err(_) => ProbeOutcome::Failed(format!(
                "connection timed out after {}s",
                timeout.as_secs()
            )),
        }
    }

    fn target(&self) -> String {
        self.config.display_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener as StdTcpListener;

    /// A port with nothing listening on it.
    fn closed_port() -> u16 {
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[test]
    fn target_names_backend_host_port_and_database() {
        let probe = SqlxDependencyProbe::new(DatabaseConfig {
            host: "db".to_string(),
            ..Default::default()
        });
        assert_eq!(probe.target(), "mysql://db:3306/quora_automation");
    }

    #[tokio::test]
    async fn refused_mysql_connection_is_a_failed_outcome() {
        let probe = SqlxDependencyProbe::new(DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: Some(closed_port()),
            connect_timeout_secs: 5,
            ..Default::default()
        });

        assert!(matches!(probe.probe().await, ProbeOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn refused_postgres_connection_is_a_failed_outcome() {
        let probe = SqlxDependencyProbe::new(DatabaseConfig {
            backend: DatabaseBackend::Postgres,
            host: "127.0.0.1".to_string(),
            port: Some(closed_port()),
            connect_timeout_secs: 5,
            ..Default::default()
        });

        assert!(matches!(probe.probe().await, ProbeOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn silent_server_times_out_as_failed_outcome() {
        // Accepts TCP but never speaks the protocol
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let _accept = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let probe = SqlxDependencyProbe::new(DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: Some(port),
            connect_timeout_secs: 1,
            ..Default::default()
        });

        match probe.probe().await {
            ProbeOutcome::Failed(detail) => assert!(detail.contains("timed out")),
            ProbeOutcome::Connected => panic!("silent server must not count as connected"),
        }
    }
}
