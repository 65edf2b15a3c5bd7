//! HTTP client for the persons service

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{E2eError, E2eResult};
use crate::person::Person;

const COLLECTION: &str = "/persons";

/// Status and body of one response
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    /// The service answers `200 OK` to every successful operation
    pub fn is_success(&self) -> bool {
        self.status == reqwest::StatusCode::OK.as_u16()
    }

    /// Pass through a 200 reply, otherwise fail as `UnexpectedStatus`
    pub fn require_success(self, operation: &str) -> E2eResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(E2eError::UnexpectedStatus {
                operation: operation.to_string(),
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Thin client over the service's `/persons` resource
#[derive(Debug, Clone)]
pub struct PersonsClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl PersonsClient {
    pub fn new(config: ServiceConfig) -> E2eResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// `GET /persons`
    pub async fn list(&self) -> E2eResult<Reply> {
        self.send(self.http.get(self.config.url(COLLECTION))).await
    }

    /// `POST /persons` with the names as form fields
    pub async fn create(&self, person: &Person) -> E2eResult<Reply> {
        let req = self
            .http
            .post(self.config.url(COLLECTION))
            .form(&form_fields(person));
        self.send(req).await
    }

    /// `GET /persons/{id}`
    pub async fn get(&self, id: u64) -> E2eResult<Reply> {
        self.send(self.http.get(self.item_url(id))).await
    }

    /// `PUT /persons/{id}` with the names as form fields
    pub async fn update(&self, id: u64, person: &Person) -> E2eResult<Reply> {
        let req = self.http.put(self.item_url(id)).form(&form_fields(person));
        self.send(req).await
    }

    /// `DELETE /persons/{id}`
    pub async fn delete(&self, id: u64) -> E2eResult<Reply> {
        self.send(self.http.delete(self.item_url(id))).await
    }

    /// Poll the collection until the service answers at all.
    ///
    /// Returns the number of attempts it took.
    pub async fn wait_until_ready(&self) -> E2eResult<usize> {
        let probe = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;
        let url = self.config.url(COLLECTION);

        let start = Instant::now();
        let mut attempts = 0;

        while start.elapsed() < self.config.ready_timeout {
            attempts += 1;

            match probe.get(&url).send().await {
                Ok(resp) => {
                    info!("Service answered {} at {}", resp.status(), url);
                    return Ok(attempts);
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for service at {}...", url);
                    }
                    // Connection refused is expected while the service starts
                    if !e.is_connect() {
                        warn!("Readiness probe error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(200)).await;
        }

        Err(E2eError::ServiceUnavailable(attempts))
    }

    fn item_url(&self, id: u64) -> String {
        self.config.url(&format!("{}/{}", COLLECTION, id))
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> E2eResult<Reply> {
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(status, body = %body, "response");
        Ok(Reply { status, body })
    }
}

fn form_fields(person: &Person) -> [(&'static str, &str); 2] {
    [
        ("firstName", person.first_name.as_str()),
        ("lastName", person.last_name.as_str()),
    ]
}
