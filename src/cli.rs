//! Command line arguments for the two binaries.
//!
//! Flags override values read from the optional TOML settings file.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tvns_core::FailureProbability;

use crate::config::{ServerSetting, SessionSetting};

fn parse_probability(value: &str) -> Result<FailureProbability, String> {
    let raw: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    FailureProbability::new(raw).map_err(|err| err.to_string())
}

#[derive(Debug, Parser)]
#[command(
    name = "tvns-mock-server",
    version,
    about = "Simulate a tVNS-R HTTP server with a configurable failure probability"
)]
pub struct ServerArgs {
    /// Port to serve on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Probability (0.0 to 1.0) that a legal command fails
    #[arg(short = 'f', long, value_parser = parse_probability)]
    pub failure_probability: Option<FailureProbability>,

    /// Seed for reproducible failure draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ServerArgs {
    pub fn apply(&self, setting: &mut ServerSetting) {
        if let Some(port) = self.port {
            setting.port = port;
        }
        if let Some(probability) = self.failure_probability {
            setting.failure_probability = probability;
        }
        if let Some(seed) = self.seed {
            setting.seed = Some(seed);
        }
        if let Some(host) = &self.host {
            setting.host = host.clone();
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tvns-session",
    version,
    about = "Run a scripted tVNS-R session and write the audit log"
)]
pub struct SessionArgs {
    /// Base URL of the device endpoint
    #[arg(long)]
    pub url: Option<String>,

    /// Audit log file; a timestamp suffix is added if it already exists
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Participant identifier written to every log line
    #[arg(short = 'P', long)]
    pub participant: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Number of stimulation pulses
    #[arg(long, default_value_t = 5)]
    pub pulses: u32,

    /// Length of each pulse in milliseconds
    #[arg(long, default_value_t = 100)]
    pub pulse_ms: u64,

    /// Gap between pulses in milliseconds
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Pause between the scripted steps in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub settle_ms: u64,

    /// Drive an in-process simulated device instead of an HTTP endpoint
    #[arg(long)]
    pub offline: bool,

    /// Failure probability of the in-process device (with --offline)
    #[arg(short = 'f', long, value_parser = parse_probability, default_value = "0", requires = "offline")]
    pub failure_probability: FailureProbability,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl SessionArgs {
    pub fn apply(&self, setting: &mut SessionSetting) {
        if let Some(url) = &self.url {
            setting.base_url = url.clone();
        }
        if let Some(path) = &self.log_file {
            setting.log_file = path.clone();
        }
        if let Some(participant) = &self.participant {
            setting.participant = Some(participant.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            setting.request_timeout_ms = timeout_ms;
        }
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_args_override_settings() {
        let args = ServerArgs::parse_from([
            "tvns-mock-server",
            "-p",
            "8080",
            "-f",
            "0.25",
            "--seed",
            "9",
        ]);
        let mut setting = ServerSetting::default();
        args.apply(&mut setting);

        assert_eq!(setting.port, 8080);
        assert_eq!(setting.failure_probability.value(), 0.25);
        assert_eq!(setting.seed, Some(9));
        assert_eq!(setting.host, "0.0.0.0");
    }

    #[test]
    fn test_server_args_reject_out_of_range_probability() {
        let result = ServerArgs::try_parse_from(["tvns-mock-server", "-f", "1.2"]);
        assert!(result.is_err());
        let result = ServerArgs::try_parse_from(["tvns-mock-server", "-f", "often"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_args_defaults() {
        let args = SessionArgs::parse_from(["tvns-session"]);
        let mut setting = SessionSetting::default();
        args.apply(&mut setting);

        assert_eq!(setting, SessionSetting::default());
        assert_eq!(args.pulses, 5);
        assert_eq!(args.pulse(), Duration::from_millis(100));
        assert!(!args.offline);
        assert_eq!(args.failure_probability, FailureProbability::NEVER);
    }

    #[test]
    fn test_session_args_override_settings() {
        let args = SessionArgs::parse_from([
            "tvns-session",
            "--url",
            "http://127.0.0.1:9000/tvnsmanager/",
            "--log-file",
            "run.txt",
            "-P",
            "P07",
            "--timeout-ms",
            "250",
        ]);
        let mut setting = SessionSetting::default();
        args.apply(&mut setting);

        assert_eq!(setting.base_url, "http://127.0.0.1:9000/tvnsmanager/");
        assert_eq!(setting.log_file, PathBuf::from("run.txt"));
        assert_eq!(setting.participant.as_deref(), Some("P07"));
        assert_eq!(setting.request_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_failure_probability_requires_offline() {
        assert!(SessionArgs::try_parse_from(["tvns-session", "-f", "0.5"]).is_err());
        let args =
            SessionArgs::try_parse_from(["tvns-session", "--offline", "-f", "0.5"]).unwrap();
        assert_eq!(args.failure_probability.value(), 0.5);
    }
}
