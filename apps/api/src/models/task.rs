use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a weekly task. Done and skipped are terminal relative to each
/// other: the only way between them is back through pending (undo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
    Skipped,
}

impl TaskStatus {
    /// Allowed transitions: pending → done, pending → skipped,
    /// done → pending (undo), skipped → pending (undo).
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Done)
                | (TaskStatus::Pending, TaskStatus::Skipped)
                | (TaskStatus::Done, TaskStatus::Pending)
                | (TaskStatus::Skipped, TaskStatus::Pending)
        )
    }
}

/// One of 10 short, concrete actions assigned to a specific week and linked
/// to one strategic step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTask {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub week_number: u32,
    pub task_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub step_number: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `weekly_tasks` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewWeeklyTask {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub week_number: u32,
    pub task_number: u32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub step_number: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_complete_or_skip() {
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Done));
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Skipped));
    }

    #[test]
    fn test_done_and_skipped_can_only_undo() {
        assert!(TaskStatus::Done.can_transition_to(TaskStatus::Pending));
        assert!(TaskStatus::Skipped.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Done.can_transition_to(TaskStatus::Skipped));
        assert!(!TaskStatus::Skipped.can_transition_to(TaskStatus::Done));
    }

    #[test]
    fn test_self_transitions_rejected() {
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Done.can_transition_to(TaskStatus::Done));
        assert!(!TaskStatus::Skipped.can_transition_to(TaskStatus::Skipped));
    }

    #[test]
    fn test_task_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Skipped).unwrap(),
            r#""skipped""#
        );
    }

    #[test]
    fn test_weekly_task_deserializes_without_step_link() {
        let json = format!(
            r#"{{
                "id": "{}",
                "goal_id": "{}",
                "week_number": 1,
                "task_number": 3,
                "title": "Оновити резюме",
                "status": "pending",
                "created_at": "2025-01-15T10:00:00Z"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let task: WeeklyTask = serde_json::from_str(&json).unwrap();
        assert!(task.step_number.is_none());
        assert_eq!(task.status, TaskStatus::Pending);
    }
}
