//! Main test runner that waits for the service and executes scenarios

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::client::PersonsClient;
use crate::config::ServiceConfig;
use crate::error::E2eResult;
use crate::scenario::Scenario;
use crate::steps::Harness;

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub title: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running all scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

/// Main E2E test runner
pub struct TestRunner {
    harness: Harness,

    /// Output directory for results
    output_dir: PathBuf,

    /// Whether the service has already answered a readiness probe
    ready: bool,
}

impl TestRunner {
    pub fn with_config(config: RunnerConfig) -> E2eResult<Self> {
        let client = PersonsClient::new(config.service)?;
        Ok(Self {
            harness: Harness::new(client),
            output_dir: config.output_dir,
            ready: false,
        })
    }

    /// Block until the service answers, once per runner
    pub async fn wait_until_ready(&mut self) -> E2eResult<()> {
        if self.ready {
            return Ok(());
        }
        let attempts = self.harness.client().wait_until_ready().await?;
        debug!("Service ready after {} attempt(s)", attempts);
        self.ready = true;
        Ok(())
    }

    /// Run every scenario
    pub async fn run_all(&mut self) -> E2eResult<TestSuiteResult> {
        self.run_scenarios(&Scenario::ALL).await
    }

    /// Run a specific scenario by name
    pub async fn run_named(&mut self, name: &str) -> E2eResult<TestSuiteResult> {
        let scenario = Scenario::from_name(name)?;
        self.run_scenarios(&[scenario]).await
    }

    /// Run scenarios one after another; a failure does not stop the rest
    pub async fn run_scenarios(&mut self, scenarios: &[Scenario]) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        self.wait_until_ready().await?;

        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            let result = self.run_scenario(*scenario).await;
            if result.success {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!("✗ {} - {}", result.name, result.error.as_deref().unwrap_or("unknown error"));
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("Test Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        Ok(TestSuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Run a single scenario and capture its outcome
    pub async fn run_scenario(&self, scenario: Scenario) -> TestResult {
        let start = Instant::now();
        debug!("Running scenario: {}", scenario.name());

        let outcome = scenario.run(&self.harness).await;

        TestResult {
            name: scenario.name().to_string(),
            title: scenario.title().to_string(),
            success: outcome.is_ok(),
            duration_ms: start.elapsed().as_millis() as u64,
            error: outcome.err().map(|e| e.to_string()),
        }
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub service: ServiceConfig,
    pub output_dir: PathBuf,
}
