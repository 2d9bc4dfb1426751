use chrono::Utc;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::models::goal::{Goal, GoalStatus, NewGoal};
use crate::store::client::{Query, StoreClient};

const TABLE: &str = "goals";

pub async fn create_goal(store: &StoreClient, goal: &NewGoal) -> Option<Goal> {
    match store.insert::<_, Goal>(TABLE, &[goal]).await {
        Ok(mut created) => created.pop(),
        Err(e) => {
            warn!("create_goal failed: {e}");
            None
        }
    }
}

pub async fn list_goals(store: &StoreClient, user_id: Uuid) -> Vec<Goal> {
    let query = Query::new().eq("user_id", user_id).order_asc("created_at");
    match store.select(TABLE, &query).await {
        Ok(goals) => goals,
        Err(e) => {
            warn!("list_goals failed for user {user_id}: {e}");
            Vec::new()
        }
    }
}

pub async fn get_goal(store: &StoreClient, id: Uuid) -> Option<Goal> {
    let query = Query::new().eq("id", id).limit(1);
    match store.select::<Goal>(TABLE, &query).await {
        Ok(mut goals) => goals.pop(),
        Err(e) => {
            warn!("get_goal failed for {id}: {e}");
            None
        }
    }
}

pub async fn update_goal_status(store: &StoreClient, id: Uuid, status: GoalStatus) -> bool {
    let query = Query::new().eq("id", id);
    let patch = json!({ "status": status, "updated_at": Utc::now() });
    match store.update(TABLE, &query, &patch).await {
        Ok(()) => true,
        Err(e) => {
            warn!("update_goal_status failed for {id}: {e}");
            false
        }
    }
}

/// Phase one of "set as primary": clear the flag on every goal of the user.
pub async fn clear_primary(store: &StoreClient, user_id: Uuid) -> bool {
    let query = Query::new().eq("user_id", user_id).eq("is_primary", true);
    let patch = json!({ "is_primary": false, "updated_at": Utc::now() });
    match store.update(TABLE, &query, &patch).await {
        Ok(()) => true,
        Err(e) => {
            warn!("clear_primary failed for user {user_id}: {e}");
            false
        }
    }
}

/// Phase two of "set as primary": flag the target goal.
pub async fn mark_primary(store: &StoreClient, goal_id: Uuid) -> bool {
    let query = Query::new().eq("id", goal_id);
    let patch = json!({ "is_primary": true, "updated_at": Utc::now() });
    match store.update(TABLE, &query, &patch).await {
        Ok(()) => true,
        Err(e) => {
            warn!("mark_primary failed for {goal_id}: {e}");
            false
        }
    }
}

/// Deletes the goal row. The backend cascades to its steps, tasks, and
/// chat messages.
pub async fn delete_goal(store: &StoreClient, id: Uuid) -> bool {
    let query = Query::new().eq("id", id);
    match store.delete(TABLE, &query).await {
        Ok(()) => true,
        Err(e) => {
            warn!("delete_goal failed for {id}: {e}");
            false
        }
    }
}
