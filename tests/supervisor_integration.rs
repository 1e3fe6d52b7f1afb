//! Integration tests for the supervisor lifecycle.
//!
//! These tests drive `Supervisor::run` end to end with stub ports:
//! 1. A blocked environment never probes, serves or schedules
//! 2. A flaky datastore is retried until it answers, then health is served
//! 3. A shutdown signal stops the scheduler and the health server cleanly
//! 4. A bounded retry budget that runs out is fatal with its own exit code
//! 5. A phase error is contained: the next cycle runs and health keeps answering

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use automation_supervisor::adapters::http::HealthServer;
use automation_supervisor::application::{Supervisor, SupervisorError};
use automation_supervisor::config::AppConfig;
use automation_supervisor::domain::cycle::Phase;
use automation_supervisor::domain::foundation::{DomainError, ErrorCode};
use automation_supervisor::domain::startup::{BlockReason, ProbeOutcome};
use automation_supervisor::ports::{DependencyProbe, PhaseExecutor};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Probe that fails a fixed number of times before connecting.
struct FlakyProbe {
    failures: u32,
    calls: AtomicU32,
}

impl FlakyProbe {
    fn new(failures: u32) -> Arc<Self> {
        Arc::new(Self {
            failures,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DependencyProbe for FlakyProbe {
    async fn probe(&self) -> ProbeOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            ProbeOutcome::Failed(format!("connection refused (attempt {call})"))
        } else {
            ProbeOutcome::Connected
        }
    }

    fn target(&self) -> String {
        "mysql://stub:3306/quora_automation".to_string()
    }
}

/// Executor recording every phase it is asked to run.
#[derive(Default)]
struct RecordingExecutor {
    fail_on: Option<(u64, Phase)>,
    calls: Mutex<Vec<(u64, Phase)>>,
}

impl RecordingExecutor {
    fn failing_on(cycle: u64, phase: Phase) -> Self {
        Self {
            fail_on: Some((cycle, phase)),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(u64, Phase)> {
        self.calls.lock().unwrap().clone()
    }

    fn phases_in_cycle(&self, cycle: u64) -> Vec<Phase> {
        self.calls()
            .into_iter()
            .filter(|(c, _)| *c == cycle)
            .map(|(_, phase)| phase)
            .collect()
    }
}

#[async_trait]
impl PhaseExecutor for RecordingExecutor {
    async fn execute(&self, cycle: u64, phase: Phase) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push((cycle, phase));
        tokio::time::sleep(Duration::from_millis(5)).await;
        if self.fail_on == Some((cycle, phase)) {
            return Err(DomainError::new(ErrorCode::PhaseFailed, "answer generation failed"));
        }
        Ok(())
    }
}

fn ready_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.ai.api_key = Some(SecretString::new("sk-proj-integration-test".to_string()));
    config.database.retry_delay_secs = 1;
    config.scheduler.cycle_interval_secs = 1;
    config
}

async fn local_listener() -> TcpListener {
    HealthServer::bind("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn placeholder_credential_blocks_before_any_component_starts() {
    let mut config = ready_config();
    config.ai.api_key = Some(SecretString::new("sk-your-actual-key-here".to_string()));
    let probe = FlakyProbe::new(0);
    let executor = Arc::new(RecordingExecutor::default());
    let listener = local_listener().await;
    let addr = listener.local_addr().unwrap();

    let result = Supervisor::new(config, probe.clone(), executor.clone())
        .with_health_listener(listener)
        .run(std::future::pending())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        SupervisorError::ConfigurationBlocked(BlockReason::MissingOrPlaceholderCredential)
    ));
    assert_ne!(err.exit_code(), 0);
    assert_eq!(probe.calls(), 0);
    assert!(executor.calls().is_empty());
    assert!(
        reqwest::get(format!("http://{addr}/api/health")).await.is_err(),
        "health must not be served when startup is blocked"
    );
}

#[tokio::test]
async fn flaky_datastore_is_retried_then_health_is_served() {
    let probe = FlakyProbe::new(2);
    let executor = Arc::new(RecordingExecutor::default());
    let listener = local_listener().await;
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let run = tokio::spawn(
        Supervisor::new(ready_config(), probe.clone(), executor.clone())
            .with_health_listener(listener)
            .run(async {
                let _ = stop_rx.await;
            }),
    );

    // Two failures, one second apart each, before the server comes up
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(probe.calls(), 3);

    let body: Value = reqwest::get(format!("http://{addr}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");

    stop_tx.send(()).unwrap();
    run.await.unwrap().unwrap();

    assert_eq!(executor.phases_in_cycle(1), Phase::ALL.to_vec());
}

#[tokio::test]
async fn shutdown_stops_scheduler_and_health_server() {
    let executor = Arc::new(RecordingExecutor::default());
    let listener = local_listener().await;
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let run = tokio::spawn(
        Supervisor::new(ready_config(), FlakyProbe::new(0), executor.clone())
            .with_health_listener(listener)
            .run(async {
                let _ = stop_rx.await;
            }),
    );
    tokio::time::sleep(Duration::from_millis(100)).await;

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(2), run)
        .await
        .expect("supervisor should stop promptly")
        .unwrap()
        .unwrap();

    let calls_at_stop = executor.calls().len();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(executor.calls().len(), calls_at_stop);
    assert!(reqwest::get(format!("http://{addr}/api/health")).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn exhausted_retry_budget_is_fatal() {
    let mut config = ready_config();
    config.database.max_attempts = Some(4);
    let probe = FlakyProbe::new(u32::MAX);
    let executor = Arc::new(RecordingExecutor::default());

    let err = Supervisor::new(config, probe.clone(), executor.clone())
        .run(std::future::pending())
        .await
        .unwrap_err();

    match &err {
        SupervisorError::DependencyUnavailable { attempts, detail } => {
            assert_eq!(*attempts, 4);
            assert!(detail.contains("connection refused"));
        }
        other => panic!("expected DependencyUnavailable, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);
    assert_eq!(probe.calls(), 4);
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn phase_error_on_cycle_three_is_contained() {
    let executor = Arc::new(RecordingExecutor::failing_on(3, Phase::Synthesis));
    let listener = local_listener().await;
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let run = tokio::spawn(
        Supervisor::new(ready_config(), FlakyProbe::new(0), executor.clone())
            .with_health_listener(listener)
            .run(async {
                let _ = stop_rx.await;
            }),
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let health_url = format!("http://{addr}/api/health");

    // Cycles are ~20ms of phases plus a 1s wait; cycle 4 starts after ~3s
    let deadline = tokio::time::Instant::now() + Duration::from_secs(8);
    while executor.phases_in_cycle(4).is_empty() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "cycle 4 never started"
        );
        let response = client.get(&health_url).send().await.unwrap();
        assert_eq!(response.status(), 200);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let response = client.get(&health_url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let status: Value = client
        .get(format!("http://{addr}/api/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["failed_cycles"], 1);
    assert!(status["cycles"].as_u64().unwrap() >= 3);

    stop_tx.send(()).unwrap();
    run.await.unwrap().unwrap();

    assert_eq!(
        executor.phases_in_cycle(3),
        vec![Phase::Acquisition, Phase::Synthesis]
    );
    assert_eq!(executor.phases_in_cycle(4).first(), Some(&Phase::Acquisition));
}
