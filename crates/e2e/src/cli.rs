//! Command-line arguments of the live runner

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::FalseyValueParser;
use clap::Parser;

use crate::config::ServiceConfig;
use crate::runner::RunnerConfig;

#[derive(Parser, Debug)]
#[command(name = "persons-e2e")]
#[command(about = "E2E test runner for the persons CRUD service")]
pub struct RunnerArgs {
    /// Actually run against the service (`PERSONS_E2E_LIVE=1` also works)
    #[arg(long, env = "PERSONS_E2E_LIVE", value_parser = FalseyValueParser::new())]
    pub live: bool,

    /// Scheme and host of the service
    #[arg(long, env = "PERSONS_BASE_URI", default_value = "http://localhost")]
    pub base_uri: String,

    /// Port of the service
    #[arg(long, env = "PERSONS_PORT", default_value = "14527")]
    pub port: u16,

    /// Path prefix of the persons resource
    #[arg(long, env = "PERSONS_BASE_PATH", default_value = "/rs")]
    pub base_path: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PERSONS_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Seconds to wait for the service to come up
    #[arg(long, default_value = "30")]
    pub ready_timeout_secs: u64,

    /// Run only the scenario with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    pub output: PathBuf,
}

impl RunnerArgs {
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            service: ServiceConfig {
                base_uri: self.base_uri.clone(),
                port: self.port,
                base_path: self.base_path.clone(),
                request_timeout: Duration::from_secs(self.timeout_secs),
                ready_timeout: Duration::from_secs(self.ready_timeout_secs),
            },
            output_dir: self.output.clone(),
        }
    }
}
