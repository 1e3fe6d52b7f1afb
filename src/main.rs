//! # Automation Supervisor
//!
//! Binary entry point. Resolves configuration once, installs logging, then
//! hands control to the [`Supervisor`] until Ctrl+C or SIGTERM.
//!
//! ```bash
//! AUTOMATION__AI__API_KEY=sk-... \
//! AUTOMATION__DATABASE__HOST=db \
//! automation-supervisor
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tokio::signal;
use tracing::{error, info, warn};

use automation_supervisor::adapters::{SimulatedPhaseExecutor, SqlxDependencyProbe};
use automation_supervisor::application::Supervisor;
use automation_supervisor::config::{AppConfig, LoggingConfig};
use automation_supervisor::telemetry;

/// Exit status when configuration cannot be loaded or logging cannot start.
const CONFIG_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let _ = telemetry::init_tracing(&LoggingConfig::default());
            error!(error = %err, "Failed to load configuration");
            return ExitCode::from(CONFIG_FAILURE);
        }
    };

    if let Err(err) = telemetry::init_tracing(&config.logging) {
        eprintln!("Failed to initialize logging: {err}");
        return ExitCode::from(CONFIG_FAILURE);
    }

    let probe = Arc::new(SqlxDependencyProbe::new(config.database.clone()));
    let executor = Arc::new(SimulatedPhaseExecutor::new(config.scheduler.phase_delay()));

    match Supervisor::new(config, probe, executor)
        .run(shutdown_signal())
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, exit_code = err.exit_code(), "Supervisor terminated");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
