//! Supervisor - owns the process lifecycle.
//!
//! Startup is strictly sequential on the caller's task: validate the
//! environment, probe the datastore until it answers, then start the health
//! server on its own task and run the cycle scheduler until the shutdown
//! future resolves. Teardown runs in the reverse order.

use std::future::Future;
use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::adapters::http::health::{HEALTH_PATH, INFO_PATH};
use crate::adapters::http::{health_router, HealthAppState, HealthServer};
use crate::config::AppConfig;
use crate::domain::startup::{BlockReason, ProbeOutcome, ValidationResult};
use crate::ports::{DependencyProbe, PhaseExecutor};

use super::context::{ServiceContext, SERVICE_NAME};
use super::scheduler::{CycleScheduler, CycleSchedulerConfig};
use super::startup::{describe_budget, probe_until_ready, retry_policy, validate_environment};

/// Fatal outcomes of a supervisor run.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("configuration blocked: {0}")]
    ConfigurationBlocked(BlockReason),

    #[error("dependency unavailable after {attempts} attempt(s): {detail}")]
    DependencyUnavailable { attempts: u32, detail: String },

    #[error("health server error: {0}")]
    HealthServer(#[from] io::Error),

    #[error("cycle scheduler stopped without a shutdown request after {cycles} cycle(s)")]
    SchedulerExited { cycles: u64 },
}

impl SupervisorError {
    /// Process exit status for this failure. Clean shutdown exits with 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            SupervisorError::ConfigurationBlocked(_) => 2,
            SupervisorError::DependencyUnavailable { .. } => 3,
            SupervisorError::HealthServer(_) => 4,
            SupervisorError::SchedulerExited { .. } => 5,
        }
    }
}

/// Wires the startup gates, health server and cycle scheduler together.
pub struct Supervisor {
    context: Arc<ServiceContext>,
    probe: Arc<dyn DependencyProbe>,
    executor: Arc<dyn PhaseExecutor>,
    listener: Option<TcpListener>,
}

impl Supervisor {
    pub fn new(
        config: AppConfig,
        probe: Arc<dyn DependencyProbe>,
        executor: Arc<dyn PhaseExecutor>,
    ) -> Self {
        Self {
            context: Arc::new(ServiceContext::new(config)),
            probe,
            executor,
            listener: None,
        }
    }

    /// Serve health on an already-bound listener instead of binding
    /// `server.host:server.port` after the probe succeeds.
    pub fn with_health_listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Run until `shutdown_signal` resolves or startup fails.
    ///
    /// A signal that arrives while the datastore is still being probed ends
    /// the run cleanly without starting anything.
    pub async fn run<F>(self, shutdown_signal: F) -> Result<(), SupervisorError>
    where
        F: Future<Output = ()> + Send,
    {
        let Supervisor {
            context,
            probe,
            executor,
            listener,
        } = self;
        let config = Arc::clone(&context.config);
        tokio::pin!(shutdown_signal);

        info!(
            service = SERVICE_NAME,
            version = env!("CARGO_PKG_VERSION"),
            instance_id = %context.instance_id,
            "Starting {}",
            SERVICE_NAME
        );

        if let ValidationResult::Blocked(reason) = validate_environment(&config) {
            error!(reason = %reason, "Environment validation failed, not starting");
            return Err(SupervisorError::ConfigurationBlocked(reason));
        }
        info!("Environment validation passed");

        let policy = retry_policy(&config);
        info!(
            target_db = %probe.target(),
            budget = %describe_budget(policy.max_attempts, policy.delay),
            "Checking database connectivity"
        );
        let report = tokio::select! {
            report = probe_until_ready(probe.as_ref(), policy) => report,
            _ = &mut shutdown_signal => {
                warn!("Interrupted while waiting for database, exiting");
                return Ok(());
            }
        };
        if let ProbeOutcome::Failed(detail) = report.outcome {
            error!(attempts = report.attempts, error = %detail, "Database unavailable, giving up");
            return Err(SupervisorError::DependencyUnavailable {
                attempts: report.attempts,
                detail,
            });
        }

        let scheduler = CycleScheduler::with_config(
            executor,
            CycleSchedulerConfig::from(&config.scheduler),
        );
        let status = scheduler.subscribe();

        let listener = match listener {
            Some(listener) => listener,
            None => HealthServer::bind(config.server.socket_addr()).await?,
        };
        let router = health_router(
            HealthAppState::new(Arc::clone(&context), status),
            config.server.request_timeout(),
        );
        let server = HealthServer::spawn(listener, router)?;
        let addr = server.local_addr();

        info!(port = addr.port(), addr = %addr, "Health server listening");
        info!(
            dashboard_url = %config.dashboard.url,
            dashboard_username = %config.dashboard.username,
            health = HEALTH_PATH,
            info = INFO_PATH,
            "System ready. Dashboard: {} (user: {}). Endpoints: {}, {}",
            config.dashboard.url,
            config.dashboard.username,
            HEALTH_PATH,
            INFO_PATH
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler_task = scheduler.run(shutdown_rx);
        tokio::pin!(scheduler_task);

        let outcome = tokio::select! {
            last = &mut scheduler_task => {
                error!(cycles = last.cycles, "Cycle scheduler exited on its own");
                Err(SupervisorError::SchedulerExited { cycles: last.cycles })
            }
            _ = &mut shutdown_signal => {
                info!("Shutdown signal received, stopping cycle scheduler");
                let _ = shutdown_tx.send(true);
                scheduler_task.await;
                Ok(())
            }
        };

        info!("Stopping health server");
        server.shutdown().await?;
        info!(uptime_secs = context.uptime_seconds(), "Shutdown complete");
        outcome
    }
}
