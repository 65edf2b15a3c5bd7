//! Parsing of the service's plain-text record listing
//!
//! The service renders rows as `[{ID=1, FIRSTNAME=a, LASTNAME=b}, ...]`.
//! Only the `ID=.., FIRSTNAME=.., LASTNAME=..` fragments matter; anything
//! around them is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::person::Person;

static RECORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ID=(\d+), FIRSTNAME=([[:alnum:]_]+), LASTNAME=([[:alnum:]_]+)")
        .expect("record pattern is valid")
});

/// Turns a response body into person records
pub trait RecordParser: Send + Sync {
    /// Records in order of appearance. No match yields an empty vec.
    fn parse(&self, text: &str) -> Vec<Person>;
}

/// Regex-based parser for the `ID=.., FIRSTNAME=.., LASTNAME=..` shape
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternParser;

impl RecordParser for PatternParser {
    fn parse(&self, text: &str) -> Vec<Person> {
        RECORD_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                // Ids too large for u64 are treated as malformed
                let id = caps[1].parse::<u64>().ok()?;
                Some(Person::new(&caps[2], &caps[3]).with_id(id))
            })
            .collect()
    }
}

/// Parse with the default pattern parser
pub fn parse(text: &str) -> Vec<Person> {
    PatternParser.parse(text)
}

/// Render records the way the service lists them
pub fn render_records(persons: &[Person]) -> String {
    let rows: Vec<String> = persons.iter().map(|p| format!("{{{}}}", p)).collect();
    format!("[{}]", rows.join(", "))
}
