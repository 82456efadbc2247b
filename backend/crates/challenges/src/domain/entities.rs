//! Challenge Domain Entities

use chrono::{DateTime, Utc};

/// A coding challenge as stored in the `challenges` table.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: i64,
    pub title: String,
    pub problem: String,
    pub concept: Option<String>,
    pub category: String,
    pub difficulty: String,
    /// Java starter code, stored verbatim
    pub sample_code: Option<String>,
    /// JSON-encoded test case list, stored verbatim
    pub test_cases: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new challenge. Display fields are already
/// HTML-escaped by the create use case.
#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub title: String,
    pub problem: String,
    pub concept: Option<String>,
    pub category: String,
    pub difficulty: String,
    pub sample_code: Option<String>,
    pub test_cases: Option<String>,
}
