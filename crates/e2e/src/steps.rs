//! Reusable scenario steps
//!
//! Each step issues one request, checks the reply and returns what the
//! next step needs. Any failed check ends the scenario.

use std::sync::Arc;

use tracing::info;

use crate::client::PersonsClient;
use crate::error::{ensure, E2eError, E2eResult};
use crate::parser::{PatternParser, RecordParser};
use crate::person::Person;

/// Client plus parser, shared by every step of a scenario
#[derive(Clone)]
pub struct Harness {
    client: PersonsClient,
    parser: Arc<dyn RecordParser>,
}

impl Harness {
    pub fn new(client: PersonsClient) -> Self {
        Self::with_parser(client, Arc::new(PatternParser))
    }

    pub fn with_parser(client: PersonsClient, parser: Arc<dyn RecordParser>) -> Self {
        Self { client, parser }
    }

    pub fn client(&self) -> &PersonsClient {
        &self.client
    }

    /// Create a person with random names and check the service echoes it back.
    ///
    /// The returned record has no id.
    pub async fn create_random_person(&self) -> E2eResult<Person> {
        let person = Person::random();
        info!("Step: create {} {}", person.first_name, person.last_name);

        let reply = self.client.create(&person).await?.require_success("create")?;

        let expected = person.echo_fragment();
        ensure(reply.body.contains(&expected), || {
            format!("create response does not contain '{}': {}", expected, reply.body)
        })?;

        let echoed = self.parser.parse(&reply.body);
        ensure(echoed.contains(&person), || {
            format!("created person {} not found in create response", person)
        })?;

        Ok(person)
    }

    /// List every person the service currently holds
    pub async fn list_all(&self) -> E2eResult<Vec<Person>> {
        let reply = self.client.list().await?.require_success("list")?;
        let persons = self.parser.parse(&reply.body);
        info!("Step: list -> {} person(s)", persons.len());
        Ok(persons)
    }

    /// Fetch one person by id; the reply must hold exactly one record
    pub async fn fetch_one(&self, id: u64) -> E2eResult<Person> {
        let reply = self.client.get(id).await?.require_success("get")?;
        let mut persons = self.parser.parse(&reply.body);
        ensure(persons.len() == 1, || {
            format!("expected 1 person for id {}, parsed {}: {}", id, persons.len(), reply.body)
        })?;
        info!("Step: get {}", id);
        Ok(persons.remove(0))
    }

    pub async fn update_person(&self, id: u64, person: &Person) -> E2eResult<()> {
        info!("Step: update {} -> {} {}", id, person.first_name, person.last_name);
        self.client.update(id, person).await?.require_success("update")?;
        Ok(())
    }

    pub async fn delete_person(&self, id: u64) -> E2eResult<()> {
        info!("Step: delete {}", id);
        self.client.delete(id).await?.require_success("delete")?;
        Ok(())
    }
}

/// Id of the first listed person
pub fn first_listed_id(persons: &[Person]) -> E2eResult<u64> {
    match persons.first() {
        None => Err(E2eError::AssertionFailed("person list is empty".to_string())),
        Some(p) => p
            .id
            .ok_or_else(|| E2eError::AssertionFailed(format!("first listed person has no id: {}", p))),
    }
}
