use tracing::warn;
use uuid::Uuid;

use crate::models::assessment::{AssessmentResult, NewAssessmentResult};
use crate::store::client::{Query, StoreClient};

const TABLE: &str = "assessment_results";

pub async fn save_result(
    store: &StoreClient,
    result: &NewAssessmentResult,
) -> Option<AssessmentResult> {
    match store.insert::<_, AssessmentResult>(TABLE, &[result]).await {
        Ok(mut created) => created.pop(),
        Err(e) => {
            warn!("save_result failed: {e}");
            None
        }
    }
}

pub async fn list_results(store: &StoreClient, user_id: Uuid) -> Vec<AssessmentResult> {
    let query = Query::new().eq("user_id", user_id).order_desc("created_at");
    match store.select(TABLE, &query).await {
        Ok(results) => results,
        Err(e) => {
            warn!("list_results failed for user {user_id}: {e}");
            Vec::new()
        }
    }
}
