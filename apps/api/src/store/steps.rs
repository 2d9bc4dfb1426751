use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::models::step::{NewStrategicStep, StepStatus, StrategicStep};
use crate::store::client::{Query, StoreClient};

const TABLE: &str = "strategic_steps";

pub async fn insert_steps(store: &StoreClient, steps: &[NewStrategicStep]) -> bool {
    match store.insert::<_, StrategicStep>(TABLE, steps).await {
        Ok(_) => true,
        Err(e) => {
            warn!("insert_steps failed: {e}");
            false
        }
    }
}

pub async fn list_steps(store: &StoreClient, goal_id: Uuid) -> Vec<StrategicStep> {
    let query = Query::new().eq("goal_id", goal_id).order_asc("step_number");
    match store.select(TABLE, &query).await {
        Ok(steps) => steps,
        Err(e) => {
            warn!("list_steps failed for goal {goal_id}: {e}");
            Vec::new()
        }
    }
}

pub async fn get_step(store: &StoreClient, id: Uuid) -> Option<StrategicStep> {
    let query = Query::new().eq("id", id).limit(1);
    match store.select::<StrategicStep>(TABLE, &query).await {
        Ok(mut steps) => steps.pop(),
        Err(e) => {
            warn!("get_step failed for {id}: {e}");
            None
        }
    }
}

pub async fn update_step_status(store: &StoreClient, id: Uuid, status: StepStatus) -> bool {
    let query = Query::new().eq("id", id);
    let patch = json!({ "status": status });
    match store.update(TABLE, &query, &patch).await {
        Ok(()) => true,
        Err(e) => {
            warn!("update_step_status failed for {id}: {e}");
            false
        }
    }
}
