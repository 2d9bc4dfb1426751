//! Week statistics — the derived counts driving the dashboard.

use serde::Serialize;

use crate::models::task::{TaskStatus, WeeklyTask};

/// Derived counts for one week's tasks. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekStats {
    pub total: u32,
    pub done: u32,
    pub skipped: u32,
    pub pending: u32,
    pub is_complete: bool,
    pub progress_percent: u32,
}

impl WeekStats {
    /// A week is complete when it has at least one task and nothing pending.
    pub fn compute(tasks: &[WeeklyTask]) -> Self {
        let total = tasks.len() as u32;
        let done = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count() as u32;
        let skipped = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Skipped)
            .count() as u32;
        let pending = total - done - skipped;

        WeekStats {
            total,
            done,
            skipped,
            pending,
            is_complete: total > 0 && pending == 0,
            // Integer division, truncating
            progress_percent: if total == 0 { 0 } else { done * 100 / total },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn task(status: TaskStatus) -> WeeklyTask {
        WeeklyTask {
            id: Uuid::new_v4(),
            goal_id: Uuid::new_v4(),
            week_number: 1,
            task_number: 1,
            title: "Задача".to_string(),
            description: String::new(),
            status,
            step_number: Some(1),
            created_at: Utc::now(),
        }
    }

    fn tasks(done: usize, skipped: usize, pending: usize) -> Vec<WeeklyTask> {
        let mut out = Vec::new();
        out.extend((0..done).map(|_| task(TaskStatus::Done)));
        out.extend((0..skipped).map(|_| task(TaskStatus::Skipped)));
        out.extend((0..pending).map(|_| task(TaskStatus::Pending)));
        out
    }

    #[test]
    fn test_counts_per_status() {
        let stats = WeekStats::compute(&tasks(4, 3, 3));
        assert_eq!(stats.total, 10);
        assert_eq!(stats.done, 4);
        assert_eq!(stats.skipped, 3);
        assert_eq!(stats.pending, 3);
    }

    #[test]
    fn test_complete_iff_nonempty_and_no_pending() {
        assert!(WeekStats::compute(&tasks(7, 3, 0)).is_complete);
        assert!(!WeekStats::compute(&tasks(7, 2, 1)).is_complete);
    }

    #[test]
    fn test_empty_week_is_never_complete() {
        let stats = WeekStats::compute(&[]);
        assert!(!stats.is_complete);
        assert_eq!(stats.progress_percent, 0);
    }

    #[test]
    fn test_progress_percent_truncates() {
        // 3 of 9 done: 33.33% truncates to 33
        let stats = WeekStats::compute(&tasks(3, 0, 6));
        assert_eq!(stats.progress_percent, 33);
    }

    #[test]
    fn test_all_skipped_week_is_complete_with_zero_progress() {
        let stats = WeekStats::compute(&tasks(0, 10, 0));
        assert!(stats.is_complete);
        assert_eq!(stats.progress_percent, 0);
    }
}
