//! Scripted tVNS-R session.
//!
//! Walks the device through a treatment with a deliberate out-of-order command,
//! a sustained stimulation and a train of short pulses, writing one audit line
//! per command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tvns_app::{CommandReport, InProcessTransport, SessionError, TvnsManager};
use tvns_core::ports::CommandTransportPort;
use tvns_infra::{FileAuditLog, HttpCommandTransport, SystemClock};
use tvnsrtools::bootstrap::tracing::init_tracing_subscriber;
use tvnsrtools::bootstrap::wiring::build_device_controller;
use tvnsrtools::cli::SessionArgs;
use tvnsrtools::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let args = SessionArgs::parse();
    init_tracing_subscriber()?;

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings.session);
    let session = &settings.session;

    let transport: Arc<dyn CommandTransportPort> = if args.offline {
        let seed = settings.server.seed;
        info!(failure_probability = %args.failure_probability, ?seed, "using an in-process device");
        let controller = build_device_controller(args.failure_probability, seed);
        Arc::new(InProcessTransport::new(controller))
    } else {
        info!(url = %session.base_url, "using HTTP endpoint");
        Arc::new(HttpCommandTransport::new(
            session.base_url.clone(),
            session.request_timeout(),
        )?)
    };

    let audit = FileAuditLog::create(&session.log_file, session.participant.clone())
        .context("无法创建审计日志")?;
    println!("Logging to {}", audit.path().display());

    let mut manager = TvnsManager::new(transport, Arc::new(audit), Arc::new(SystemClock));
    run_walkthrough(&mut manager, &args).await
}

async fn run_walkthrough(manager: &mut TvnsManager, args: &SessionArgs) -> Result<()> {
    let settle = args.settle();

    report("initialise", manager.initialize_connection().await)?;
    report("startTreatment", manager.start_treatment().await)?;
    // Out of order on purpose: the device rejects it and the log shows why
    report("stopStimulation", manager.stop_stimulation().await)?;
    tokio::time::sleep(settle).await;

    report("startStimulation", manager.start_stimulation().await)?;
    tokio::time::sleep(settle * 2).await;
    report(
        "pauseStimulation",
        manager.pause_stimulation(Duration::from_secs(1)).await,
    )?;
    tokio::time::sleep(settle).await;
    report("stopStimulation", manager.stop_stimulation().await)?;
    tokio::time::sleep(settle).await;

    for n in 1..=args.pulses {
        let step = format!("pulse {n}/{}", args.pulses);
        report(&step, manager.pulse(args.pulse()).await)?;
        tokio::time::sleep(args.interval()).await;
    }

    tokio::time::sleep(settle).await;
    report("stopTreatment", manager.stop_treatment().await)?;
    Ok(())
}

/// Print one step. Only an audit failure ends the session.
fn report(step: &str, result: Result<CommandReport, SessionError>) -> Result<()> {
    match result {
        Ok(report) => println!("{step:<18} ok        {} [{}]", report.message, report.state),
        Err(err) if !err.is_recoverable() => return Err(err.into()),
        Err(err) => {
            let outcome = err.audit_outcome().map(|o| o.as_str()).unwrap_or("error");
            println!("{step:<18} {outcome:<9} {err}");
        }
    }
    Ok(())
}
