use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

/// A user's career objective. At most one goal per user carries
/// `is_primary = true`; a user holds at most 3 goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub assessment_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub target_salary: Option<String>,
    pub is_primary: bool,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the `goals` collection. The id is generated client-side
/// so dependent step/task inserts can reference it before the write returns.
#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessment_id: Option<Uuid>,
    pub title: String,
    pub target_salary: Option<String>,
    pub is_primary: bool,
    pub status: GoalStatus,
}

impl NewGoal {
    pub fn new(user_id: Uuid, title: String, target_salary: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            assessment_id: None,
            title,
            target_salary,
            is_primary: false,
            status: GoalStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&GoalStatus::Active).unwrap(),
            r#""active""#
        );
        assert_eq!(
            serde_json::to_string(&GoalStatus::Paused).unwrap(),
            r#""paused""#
        );
        assert_eq!(
            serde_json::to_string(&GoalStatus::Completed).unwrap(),
            r#""completed""#
        );
    }

    #[test]
    fn test_goal_deserializes_with_optional_columns_absent() {
        let json = format!(
            r#"{{
                "id": "{}",
                "user_id": "{}",
                "title": "Стати керівником",
                "is_primary": true,
                "status": "active",
                "created_at": "2025-01-15T10:00:00Z",
                "updated_at": "2025-01-15T10:00:00Z"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let goal: Goal = serde_json::from_str(&json).unwrap();
        assert!(goal.assessment_id.is_none());
        assert!(goal.target_salary.is_none());
        assert!(goal.is_primary);
    }

    #[test]
    fn test_new_goal_defaults_to_active_non_primary() {
        let goal = NewGoal::new(Uuid::new_v4(), "Senior Engineer".to_string(), None);
        assert_eq!(goal.status, GoalStatus::Active);
        assert!(!goal.is_primary);
    }
}
