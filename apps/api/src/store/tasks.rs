use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::models::task::{NewWeeklyTask, TaskStatus, WeeklyTask};
use crate::store::client::{Query, StoreClient};

const TABLE: &str = "weekly_tasks";

pub async fn insert_tasks(store: &StoreClient, tasks: &[NewWeeklyTask]) -> bool {
    match store.insert::<_, WeeklyTask>(TABLE, tasks).await {
        Ok(_) => true,
        Err(e) => {
            warn!("insert_tasks failed: {e}");
            false
        }
    }
}

pub async fn list_week_tasks(store: &StoreClient, goal_id: Uuid, week: u32) -> Vec<WeeklyTask> {
    let query = Query::new()
        .eq("goal_id", goal_id)
        .eq("week_number", week)
        .order_asc("task_number");
    match store.select(TABLE, &query).await {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!("list_week_tasks failed for goal {goal_id} week {week}: {e}");
            Vec::new()
        }
    }
}

pub async fn get_task(store: &StoreClient, id: Uuid) -> Option<WeeklyTask> {
    let query = Query::new().eq("id", id).limit(1);
    match store.select::<WeeklyTask>(TABLE, &query).await {
        Ok(mut tasks) => tasks.pop(),
        Err(e) => {
            warn!("get_task failed for {id}: {e}");
            None
        }
    }
}

pub async fn update_task_status(store: &StoreClient, id: Uuid, status: TaskStatus) -> bool {
    let query = Query::new().eq("id", id);
    let patch = json!({ "status": status });
    match store.update(TABLE, &query, &patch).await {
        Ok(()) => true,
        Err(e) => {
            warn!("update_task_status failed for {id}: {e}");
            false
        }
    }
}

/// The highest week number any task of the goal carries. 0 when the goal has
/// no tasks (or the lookup fails).
pub async fn current_week(store: &StoreClient, goal_id: Uuid) -> u32 {
    let query = Query::new()
        .eq("goal_id", goal_id)
        .order_desc("week_number")
        .limit(1);
    match store.select::<WeeklyTask>(TABLE, &query).await {
        Ok(tasks) => tasks.first().map(|t| t.week_number).unwrap_or(0),
        Err(e) => {
            warn!("current_week failed for goal {goal_id}: {e}");
            0
        }
    }
}
