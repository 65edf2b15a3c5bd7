//! Persons E2E Test Harness
//!
//! This crate drives black-box CRUD checks against a running persons
//! service:
//! - Talks to the service over HTTP with form-encoded writes
//! - Parses the service's plain-text record listing into `Person` values
//! - Runs labelled scenarios that compare collection state before and after
//! - Reports pass/fail per scenario as JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  E2E Test Runner (Rust)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── wait_until_ready()                                   │
//! │    ├── run_scenario(scenario) -> TestResult                 │
//! │    └── write_results(suite) -> test-results.json            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Harness (steps)                                            │
//! │    ├── create_random_person / list_all / fetch_one          │
//! │    └── update_person / delete_person                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PersonsClient (reqwest)     RecordParser (regex)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod person;
pub mod runner;
pub mod scenario;
pub mod steps;

pub use client::{PersonsClient, Reply};
pub use config::ServiceConfig;
pub use error::{E2eError, E2eResult};
pub use parser::{PatternParser, RecordParser};
pub use person::Person;
pub use runner::TestRunner;
pub use scenario::Scenario;
pub use steps::Harness;
