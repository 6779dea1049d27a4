//! Client session against the mock server over real HTTP.

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tvns_app::{SessionError, TvnsManager};
use tvns_core::device::DeviceState;
use tvns_core::protocol::{CommandResponse, ResponseOutcome};
use tvns_core::FailureProbability;
use tvns_infra::{FileAuditLog, HttpCommandTransport, SystemClock};
use tvnsrtools::config::ServerSetting;
use tvnsrtools::MockServer;

struct RunningServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl RunningServer {
    async fn start(probability: FailureProbability) -> anyhow::Result<Self> {
        let setting = ServerSetting {
            host: "127.0.0.1".to_string(),
            port: 0,
            failure_probability: probability,
            seed: Some(11),
        };
        let (tx, rx) = oneshot::channel::<()>();
        let (addr, serving) = MockServer::from_setting(&setting)?.bind(async {
            rx.await.ok();
        })?;
        Ok(Self {
            addr,
            shutdown: Some(tx),
            handle: tokio::spawn(serving),
        })
    }

    fn base_url(&self) -> String {
        format!("http://{}/tvnsmanager/", self.addr)
    }

    async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
        self.handle.await?;
        Ok(())
    }
}

fn session(base_url: String, audit: FileAuditLog) -> anyhow::Result<TvnsManager> {
    let transport = HttpCommandTransport::new(base_url, Duration::from_secs(2))?;
    Ok(TvnsManager::new(
        Arc::new(transport),
        Arc::new(audit),
        Arc::new(SystemClock),
    ))
}

#[tokio::test]
async fn full_walk_over_http_is_logged() -> anyhow::Result<()> {
    let server = RunningServer::start(FailureProbability::NEVER).await?;
    let dir = tempfile::tempdir()?;
    let audit = FileAuditLog::create(dir.path().join("tvnslog"), Some("P01".to_string()))?;
    let log_path = audit.path().to_path_buf();
    let mut manager = session(server.base_url(), audit)?;

    assert_eq!(manager.initialize_connection().await?.state, DeviceState::Idle);
    assert_eq!(manager.start_treatment().await?.state, DeviceState::TreatmentActive);
    assert_eq!(manager.start_stimulation().await?.state, DeviceState::StimulationActive);
    let paused = manager.pause_stimulation(Duration::from_millis(1500)).await?;
    assert_eq!(paused.state, DeviceState::StimulationPaused);
    assert!(paused.message.contains("1.5"));
    assert_eq!(manager.stop_stimulation().await?.state, DeviceState::TreatmentActive);
    manager.pulse(Duration::from_millis(20)).await?;
    assert_eq!(manager.stop_treatment().await?.state, DeviceState::Idle);
    assert_eq!(manager.last_known_state(), Some(DeviceState::Idle));

    let contents = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|l| l.contains(" - Participant: P01 - ")));
    assert!(lines[0].contains(" - initialise - success"));
    assert!(lines[5].contains(" - startStimulation - success"));
    assert!(lines[7].contains(" - stopTreatment - success"));

    server.stop().await
}

#[tokio::test]
async fn rejection_and_fault_are_told_apart() -> anyhow::Result<()> {
    let server = RunningServer::start(FailureProbability::ALWAYS).await?;
    let dir = tempfile::tempdir()?;
    let audit = FileAuditLog::create(dir.path().join("tvnslog"), None)?;
    let log_path = audit.path().to_path_buf();
    let mut manager = session(server.base_url(), audit)?;

    let err = manager.start_stimulation().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::IllegalState {
            state: DeviceState::Disconnected,
            ..
        }
    ));

    let err = manager.initialize_connection().await.unwrap_err();
    assert!(matches!(err, SessionError::SimulatedFailure { .. }));
    assert_eq!(manager.last_known_state(), Some(DeviceState::Disconnected));

    let contents = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(" - startStimulation - rejected"));
    assert!(lines[1].contains(" - initialise - simulated_failure"));

    server.stop().await
}

#[tokio::test]
async fn unreachable_endpoint_is_logged_as_transport_error() -> anyhow::Result<()> {
    let server = RunningServer::start(FailureProbability::NEVER).await?;
    let base_url = server.base_url();
    server.stop().await?;

    let dir = tempfile::tempdir()?;
    let audit = FileAuditLog::create(dir.path().join("tvnslog"), None)?;
    let log_path = audit.path().to_path_buf();
    let mut manager = session(base_url, audit)?;

    let err = manager.initialize_connection().await.unwrap_err();
    assert!(matches!(err, SessionError::Transport { .. }));
    assert_eq!(manager.last_known_state(), None);

    let contents = fs::read_to_string(&log_path)?;
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains(" - initialise - transport_error"));
    Ok(())
}

#[tokio::test]
async fn plain_text_body_on_the_base_path_is_understood() -> anyhow::Result<()> {
    let server = RunningServer::start(FailureProbability::NEVER).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.base_url())
        .header("content-type", "text/plain")
        .body("initialize")
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 200);
    let body: CommandResponse = serde_json::from_str(&res.text().await?)?;
    assert_eq!(body.outcome, ResponseOutcome::Success);
    assert_eq!(body.state, DeviceState::Idle);

    let res = client
        .post(server.base_url())
        .body("reboot")
        .send()
        .await?;
    assert_eq!(res.status().as_u16(), 400);

    server.stop().await
}
