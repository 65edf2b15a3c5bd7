//! CRUD scenarios against the persons service
//!
//! Scenarios share the remote collection, which may already hold rows or be
//! touched by other runs. They therefore only check relative changes or
//! records they created themselves, never absolute counts.

use tracing::info;

use crate::error::{ensure, E2eError, E2eResult};
use crate::person::Person;
use crate::steps::{first_listed_id, Harness};

/// One independent end-to-end check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    ListNotEmpty,
    CreateIncrementsCount,
    UpdateById,
    GetById,
    DeleteById,
}

impl Scenario {
    /// All scenarios in run order
    pub const ALL: [Scenario; 5] = [
        Scenario::ListNotEmpty,
        Scenario::CreateIncrementsCount,
        Scenario::UpdateById,
        Scenario::GetById,
        Scenario::DeleteById,
    ];

    /// Stable identifier used for filtering and in reports
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ListNotEmpty => "list-not-empty",
            Scenario::CreateIncrementsCount => "create-increments-count",
            Scenario::UpdateById => "update-by-id",
            Scenario::GetById => "get-by-id",
            Scenario::DeleteById => "delete-by-id",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::ListNotEmpty => "List all persons",
            Scenario::CreateIncrementsCount => "Add a person",
            Scenario::UpdateById => "Update a person",
            Scenario::GetById => "Get a person",
            Scenario::DeleteById => "Delete a person",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::ListNotEmpty => {
                "Creates a person, then GET /persons must return a non-empty list"
            }
            Scenario::CreateIncrementsCount => {
                "POST /persons must grow the list by exactly one"
            }
            Scenario::UpdateById => {
                "PUT /persons/{id} on a listed id, then GET /persons/{id} must return the new names"
            }
            Scenario::GetById => {
                "GET /persons/{id} on a listed id must return exactly that listed person"
            }
            Scenario::DeleteById => {
                "DELETE /persons/{id} on a listed id must shrink the list by exactly one"
            }
        }
    }

    pub fn from_name(name: &str) -> E2eResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| E2eError::UnknownScenario(name.to_string()))
    }

    /// Run to completion, stopping at the first failed check
    pub async fn run(&self, harness: &Harness) -> E2eResult<()> {
        info!("Scenario: {} - {}", self.name(), self.description());
        match self {
            Scenario::ListNotEmpty => list_not_empty(harness).await,
            Scenario::CreateIncrementsCount => create_increments_count(harness).await,
            Scenario::UpdateById => update_by_id(harness).await,
            Scenario::GetById => get_by_id(harness).await,
            Scenario::DeleteById => delete_by_id(harness).await,
        }
    }
}

async fn list_not_empty(harness: &Harness) -> E2eResult<()> {
    harness.create_random_person().await?;
    let persons = harness.list_all().await?;
    ensure(!persons.is_empty(), || "list is empty after create".to_string())
}

async fn create_increments_count(harness: &Harness) -> E2eResult<()> {
    let before = harness.list_all().await?.len();
    harness.create_random_person().await?;
    let after = harness.list_all().await?.len();
    ensure(after == before + 1, || {
        format!("expected {} person(s) after create, found {}", before + 1, after)
    })
}

async fn update_by_id(harness: &Harness) -> E2eResult<()> {
    harness.create_random_person().await?;
    let persons = harness.list_all().await?;
    let id = first_listed_id(&persons)?;

    let target = Person::random();
    harness.update_person(id, &target).await?;

    let current = harness.fetch_one(id).await?;
    ensure(current == target, || {
        format!("person {} is {} after update, expected {}", id, current, target)
    })
}

async fn get_by_id(harness: &Harness) -> E2eResult<()> {
    harness.create_random_person().await?;
    let persons = harness.list_all().await?;
    let id = first_listed_id(&persons)?;

    let fetched = harness.fetch_one(id).await?;
    let listed = &persons[0];
    ensure(fetched == *listed, || {
        format!("GET {} returned {}, list has {}", id, fetched, listed)
    })
}

async fn delete_by_id(harness: &Harness) -> E2eResult<()> {
    harness.create_random_person().await?;
    let before = harness.list_all().await?;
    let id = first_listed_id(&before)?;

    harness.delete_person(id).await?;

    let after = harness.list_all().await?.len();
    ensure(before.len() == after + 1, || {
        format!("expected {} person(s) after delete, found {}", before.len() - 1, after)
    })
}
