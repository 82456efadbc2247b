//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::Challenge;

/// Challenge as serialized in responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDto {
    pub id: i64,
    pub title: String,
    pub problem: String,
    pub concept: Option<String>,
    pub category: String,
    pub difficulty: String,
    pub sample_code: Option<String>,
    pub test_cases: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Challenge> for ChallengeDto {
    fn from(challenge: Challenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title,
            problem: challenge.problem,
            concept: challenge.concept,
            category: challenge.category,
            difficulty: challenge.difficulty,
            sample_code: challenge.sample_code,
            test_cases: challenge.test_cases,
            created_at: challenge.created_at,
        }
    }
}

/// List response: `{"challenges": [...]}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChallengesResponse {
    pub challenges: Vec<ChallengeDto>,
}

/// Create request
///
/// Fields are optional so that missing values surface as the flow's own
/// 400 response instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    pub title: Option<String>,
    pub problem: Option<String>,
    pub concept: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub sample_code: Option<String>,
    pub test_cases: Option<String>,
}

/// Create response: `{"success": true, "challenge": {...}}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeResponse {
    pub success: bool,
    pub challenge: ChallengeDto,
}

/// Delete response: `{"success": true}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChallengeResponse {
    pub success: bool,
}

/// Bulk delete request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub ids: Option<Vec<i64>>,
}

/// Bulk delete response: `{"success": true, "deletedCount": n}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
}
