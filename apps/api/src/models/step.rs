use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a strategic step. Toggles cyclically from the UI:
/// pending → in_progress → done → pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl StepStatus {
    /// The next status in the cyclic toggle sequence. Direct jumps via
    /// explicit status selection are also allowed at the handler level.
    pub fn toggled(self) -> Self {
        match self {
            StepStatus::Pending => StepStatus::InProgress,
            StepStatus::InProgress => StepStatus::Done,
            StepStatus::Done => StepStatus::Pending,
        }
    }
}

/// One of 10 multi-week phases of a goal's plan.
/// Week ranges may overlap across steps (parallel tracks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicStep {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub step_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timeframe: String,
    pub start_week: u32,
    pub end_week: u32,
    pub status: StepStatus,
    pub created_at: DateTime<Utc>,
}

impl StrategicStep {
    /// Whether this step's week range contains the given week.
    pub fn covers_week(&self, week: u32) -> bool {
        self.start_week <= week && week <= self.end_week
    }
}

/// Insert payload for the `strategic_steps` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewStrategicStep {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub step_number: u32,
    pub title: String,
    pub description: String,
    pub timeframe: String,
    pub start_week: u32,
    pub end_week: u32,
    pub status: StepStatus,
}
