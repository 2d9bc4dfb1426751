use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Persisted outcome of a completed assessment: the raw answers plus the
/// headline numbers of the plan generated from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Raw answers keyed by question id, stored as a JSON object.
    pub answers: Value,
    pub match_score: u32,
    #[serde(default)]
    pub gap_analysis: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `assessment_results` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewAssessmentResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub match_score: u32,
    pub gap_analysis: String,
}
