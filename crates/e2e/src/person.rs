//! The person record exchanged with the service

use std::fmt;

use rand::Rng;

/// Upper bound (exclusive) for the numeric suffix of generated names
const NAME_SUFFIX_RANGE: u32 = 1_000_000;

/// A person record as stored by the service.
///
/// Equality compares names only. The id is assigned by the service, so a
/// locally built record never carries one.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    /// A record that has not been persisted yet
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Generate `firstName<n>` / `lastName<m>` with random suffixes.
    ///
    /// Collisions are unlikely but possible.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::new(
            format!("firstName{}", rng.gen_range(0..NAME_SUFFIX_RANGE)),
            format!("lastName{}", rng.gen_range(0..NAME_SUFFIX_RANGE)),
        )
    }

    /// Tail of the service's create echo, e.g. `FIRSTNAME=a, LASTNAME=b}]`
    pub fn echo_fragment(&self) -> String {
        format!("FIRSTNAME={}, LASTNAME={}}}]", self.first_name, self.last_name)
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.first_name == other.first_name && self.last_name == other.last_name
    }
}

impl Eq for Person {}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={}, FIRSTNAME={}, LASTNAME={}",
            self.id.unwrap_or(0),
            self.first_name,
            self.last_name
        )
    }
}
