//! Goal management: the 3-goal advisory limit, the two-phase primary-flag
//! update, and the repair pass that keeps "at most one primary" true.

pub mod handlers;

use tracing::warn;
use uuid::Uuid;

use crate::models::goal::Goal;
use crate::store::{goals, StoreClient};

/// Picks which flagged goal survives a reconciliation: the most recently
/// updated one. Returns `None` when zero or one goal is flagged (nothing to
/// repair).
pub fn primary_to_keep(flagged: &[&Goal]) -> Option<Uuid> {
    if flagged.len() < 2 {
        return None;
    }
    flagged.iter().max_by_key(|g| g.updated_at).map(|g| g.id)
}

/// Repair pass for the non-atomic two-phase "set primary" update. A crash or
/// interleaved call between the clear and set writes can leave a user with
/// multiple primary goals; this clears all but the most recently updated one.
pub async fn reconcile_primary(store: &StoreClient, user_id: Uuid) {
    let all = goals::list_goals(store, user_id).await;
    let flagged: Vec<&Goal> = all.iter().filter(|g| g.is_primary).collect();

    let Some(keep) = primary_to_keep(&flagged) else {
        return;
    };

    warn!(
        "user {user_id} has {} primary goals; keeping {keep}",
        flagged.len()
    );
    if !goals::clear_primary(store, user_id).await {
        warn!("reconcile_primary could not clear flags for user {user_id}");
        return;
    }
    if !goals::mark_primary(store, keep).await {
        warn!("reconcile_primary cleared flags but could not re-flag {keep}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query as UrlQuery, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use chrono::{DateTime, Duration, Utc};
    use serde_json::Value;

    use crate::models::goal::GoalStatus;

    fn goal_for(user_id: Uuid, is_primary: bool, updated_minutes_ago: i64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id,
            assessment_id: None,
            title: "Ціль".to_string(),
            target_salary: None,
            is_primary,
            status: GoalStatus::Active,
            created_at: Utc::now() - Duration::minutes(updated_minutes_ago),
            updated_at: Utc::now() - Duration::minutes(updated_minutes_ago),
        }
    }

    fn goal(is_primary: bool, updated_minutes_ago: i64) -> Goal {
        goal_for(Uuid::new_v4(), is_primary, updated_minutes_ago)
    }

    #[test]
    fn test_no_repair_needed_for_single_primary() {
        let g = goal(true, 5);
        assert!(primary_to_keep(&[&g]).is_none());
    }

    #[test]
    fn test_no_repair_needed_for_zero_primaries() {
        assert!(primary_to_keep(&[]).is_none());
    }

    #[test]
    fn test_most_recently_updated_primary_survives() {
        let older = goal(true, 60);
        let newer = goal(true, 1);
        let keep = primary_to_keep(&[&older, &newer]).unwrap();
        assert_eq!(keep, newer.id);
    }

    // ── Stub goals collection ────────────────────────────────────────────
    //
    // A minimal in-process server speaking just enough of the store's REST
    // contract (eq filters on GET and PATCH) to drive the two-phase
    // set-primary sequence end to end, in the same seam-substitution spirit
    // as the canned text generators in the plan tests.

    type Rows = Arc<Mutex<Vec<Goal>>>;

    fn row_matches(goal: &Goal, params: &[(String, String)]) -> bool {
        params.iter().all(|(column, value)| {
            let Some(want) = value.strip_prefix("eq.") else {
                // order / limit parameters, not filters
                return true;
            };
            match column.as_str() {
                "id" => goal.id.to_string() == want,
                "user_id" => goal.user_id.to_string() == want,
                "is_primary" => goal.is_primary.to_string() == want,
                _ => true,
            }
        })
    }

    async fn stub_list(
        State(rows): State<Rows>,
        UrlQuery(params): UrlQuery<Vec<(String, String)>>,
    ) -> Json<Vec<Goal>> {
        let rows = rows.lock().unwrap();
        Json(
            rows.iter()
                .filter(|g| row_matches(g, &params))
                .cloned()
                .collect(),
        )
    }

    async fn stub_patch(
        State(rows): State<Rows>,
        UrlQuery(params): UrlQuery<Vec<(String, String)>>,
        Json(patch): Json<Value>,
    ) -> StatusCode {
        let mut rows = rows.lock().unwrap();
        for g in rows.iter_mut().filter(|g| row_matches(g, &params)) {
            if let Some(flag) = patch.get("is_primary").and_then(Value::as_bool) {
                g.is_primary = flag;
            }
            if let Some(ts) = patch
                .get("updated_at")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            {
                g.updated_at = ts;
            }
        }
        StatusCode::NO_CONTENT
    }

    async fn spawn_store(rows: Rows) -> StoreClient {
        let app = Router::new()
            .route("/goals", get(stub_list).patch(stub_patch))
            .with_state(rows);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        StoreClient::new(format!("http://{addr}"), "test-key".to_string())
    }

    fn flagged_ids(goals: &[Goal]) -> Vec<Uuid> {
        goals
            .iter()
            .filter(|g| g.is_primary)
            .map(|g| g.id)
            .collect()
    }

    #[tokio::test]
    async fn test_set_primary_sequence_leaves_exactly_one_flagged() {
        let user_id = Uuid::new_v4();
        let first = goal_for(user_id, true, 90);
        let second = goal_for(user_id, false, 60);
        let other_user = goal_for(Uuid::new_v4(), true, 30);
        let other_user_id = other_user.user_id;
        let target = second.id;
        let store = spawn_store(Arc::new(Mutex::new(vec![first, second, other_user]))).await;

        // the same clear → mark → reconcile sequence the handler runs
        assert!(goals::clear_primary(&store, user_id).await);
        assert!(goals::mark_primary(&store, target).await);
        reconcile_primary(&store, user_id).await;

        let listed = goals::list_goals(&store, user_id).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(flagged_ids(&listed), vec![target]);

        // the clear is scoped to the user; other users keep their flag
        let others = goals::list_goals(&store, other_user_id).await;
        assert!(others.iter().all(|g| g.is_primary));
    }

    #[tokio::test]
    async fn test_reconcile_repairs_interleaved_double_flag() {
        // Two interleaved set-primary calls can leave both goals flagged;
        // the repair pass keeps only the most recently updated one.
        let user_id = Uuid::new_v4();
        let older = goal_for(user_id, true, 60);
        let newer = goal_for(user_id, true, 1);
        let keep = newer.id;
        let store = spawn_store(Arc::new(Mutex::new(vec![older, newer]))).await;

        reconcile_primary(&store, user_id).await;

        let listed = goals::list_goals(&store, user_id).await;
        assert_eq!(flagged_ids(&listed), vec![keep]);
    }

    #[tokio::test]
    async fn test_reconcile_leaves_healthy_state_untouched() {
        let user_id = Uuid::new_v4();
        let primary = goal_for(user_id, true, 10);
        let secondary = goal_for(user_id, false, 5);
        let keep = primary.id;
        let before = primary.updated_at;
        let store = spawn_store(Arc::new(Mutex::new(vec![primary, secondary]))).await;

        reconcile_primary(&store, user_id).await;

        let listed = goals::list_goals(&store, user_id).await;
        assert_eq!(flagged_ids(&listed), vec![keep]);
        let kept = listed.iter().find(|g| g.id == keep).unwrap();
        // no writes happened, so the timestamp is unchanged
        assert_eq!(kept.updated_at, before);
    }
}
