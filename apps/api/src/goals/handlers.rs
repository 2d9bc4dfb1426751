//! Axum route handlers for the Goals API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assessment::handlers::MAX_GOALS_PER_USER;
use crate::errors::AppError;
use crate::goals::reconcile_primary;
use crate::models::goal::{Goal, GoalStatus, NewGoal};
use crate::models::step::StrategicStep;
use crate::state::AppState;
use crate::store::{goals, steps, tasks};

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub user_id: Uuid,
    pub title: String,
    pub target_salary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoalStatusRequest {
    pub status: GoalStatus,
}

#[derive(Debug, Serialize)]
pub struct GoalDetailResponse {
    pub goal: Goal,
    pub steps: Vec<StrategicStep>,
    pub current_week: u32,
}

/// GET /api/v1/goals?user_id=...
pub async fn handle_list_goals(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Json<Vec<Goal>> {
    Json(goals::list_goals(&state.store, params.user_id).await)
}

/// POST /api/v1/goals
///
/// Manual goal creation (outside the assessment pipeline). The 3-goal limit
/// is a client-side pre-check only and is advisory under concurrent writers.
pub async fn handle_create_goal(
    State(state): State<AppState>,
    Json(request): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let existing = goals::list_goals(&state.store, request.user_id).await;
    if existing.len() >= MAX_GOALS_PER_USER {
        return Err(AppError::Conflict(format!(
            "user already holds {MAX_GOALS_PER_USER} goals"
        )));
    }

    let mut new_goal = NewGoal::new(request.user_id, request.title, request.target_salary);
    new_goal.is_primary = existing.is_empty();

    let created = goals::create_goal(&state.store, &new_goal)
        .await
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("goal could not be saved")))?;

    info!("created goal {} for user {}", created.id, request.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/goals/:id
pub async fn handle_get_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> Result<Json<GoalDetailResponse>, AppError> {
    let goal = goals::get_goal(&state.store, goal_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Goal {goal_id} not found")))?;
    let steps = steps::list_steps(&state.store, goal_id).await;
    let current_week = tasks::current_week(&state.store, goal_id).await;

    Ok(Json(GoalDetailResponse {
        goal,
        steps,
        current_week,
    }))
}

/// POST /api/v1/goals/:id/primary
///
/// Two sequential remote writes: clear is-primary on all of the user's goals,
/// then set it on the target. Not atomic; `reconcile_primary` runs after as
/// the repair pass for interleaved calls.
pub async fn handle_set_primary(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let goal = goals::get_goal(&state.store, goal_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Goal {goal_id} not found")))?;

    goals::clear_primary(&state.store, goal.user_id).await;
    goals::mark_primary(&state.store, goal_id).await;
    reconcile_primary(&state.store, goal.user_id).await;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/goals/:id/status
pub async fn handle_goal_status(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
    Json(request): Json<GoalStatusRequest>,
) -> Result<StatusCode, AppError> {
    if goals::get_goal(&state.store, goal_id).await.is_none() {
        return Err(AppError::NotFound(format!("Goal {goal_id} not found")));
    }
    goals::update_goal_status(&state.store, goal_id, request.status).await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/goals/:id
///
/// The backend cascades the delete to the goal's steps, tasks, and chat
/// messages.
pub async fn handle_delete_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if goals::get_goal(&state.store, goal_id).await.is_none() {
        return Err(AppError::NotFound(format!("Goal {goal_id} not found")));
    }
    goals::delete_goal(&state.store, goal_id).await;
    Ok(StatusCode::NO_CONTENT)
}
