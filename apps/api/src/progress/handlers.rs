//! Axum route handlers for the Progress API: week views, status updates, and
//! next-week task generation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::step::StepStatus;
use crate::models::task::{NewWeeklyTask, TaskStatus, WeeklyTask};
use crate::plan::generator::{
    active_step_numbers, fallback_week_tasks, generate_week_tasks, DraftTask,
};
use crate::progress::WeekStats;
use crate::state::AppState;
use crate::store::{goals, steps, tasks};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub week: u32,
    pub tasks: Vec<WeeklyTask>,
    pub stats: WeekStats,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub current_week: u32,
    pub stats: WeekStats,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct StepStatusRequest {
    /// Explicit target status. Absent means "advance the cyclic toggle".
    pub status: Option<StepStatus>,
}

#[derive(Debug, Serialize)]
pub struct StepStatusResponse {
    pub status: StepStatus,
}

#[derive(Debug, Serialize)]
pub struct GenerateWeekResponse {
    pub week: u32,
    pub tasks: Vec<WeeklyTask>,
    /// True when the tasks are the deterministic fallback rather than LLM
    /// output.
    pub synthetic: bool,
    pub persisted: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/goals/:id/weeks/:week
pub async fn handle_get_week(
    State(state): State<AppState>,
    Path((goal_id, week)): Path<(Uuid, u32)>,
) -> Result<Json<WeekResponse>, AppError> {
    if week == 0 {
        return Err(AppError::Validation("week numbers start at 1".to_string()));
    }
    let week_tasks = tasks::list_week_tasks(&state.store, goal_id, week).await;
    let stats = WeekStats::compute(&week_tasks);
    Ok(Json(WeekResponse {
        week,
        tasks: week_tasks,
        stats,
    }))
}

/// GET /api/v1/goals/:id/progress
///
/// Stats for the goal's current (highest) week.
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, AppError> {
    let current_week = tasks::current_week(&state.store, goal_id).await;
    let week_tasks = tasks::list_week_tasks(&state.store, goal_id, current_week).await;
    Ok(Json(ProgressResponse {
        current_week,
        stats: WeekStats::compute(&week_tasks),
    }))
}

/// PATCH /api/v1/tasks/:id/status
///
/// Enforces the task status machine: pending ↔ done, pending ↔ skipped.
/// Historical weeks stay mutable here; read-only history is a client-side
/// convention.
pub async fn handle_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(request): Json<TaskStatusRequest>,
) -> Result<StatusCode, AppError> {
    let task = tasks::get_task(&state.store, task_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))?;

    if !task.status.can_transition_to(request.status) {
        return Err(AppError::Validation(format!(
            "cannot transition task from {:?} to {:?}",
            task.status, request.status
        )));
    }

    tasks::update_task_status(&state.store, task_id, request.status).await;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/steps/:id/status
///
/// With a body status, jumps directly; with an empty body, advances the
/// cyclic toggle (pending → in_progress → done → pending).
pub async fn handle_step_status(
    State(state): State<AppState>,
    Path(step_id): Path<Uuid>,
    Json(request): Json<StepStatusRequest>,
) -> Result<Json<StepStatusResponse>, AppError> {
    let step = steps::get_step(&state.store, step_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Step {step_id} not found")))?;

    let next = request.status.unwrap_or_else(|| step.status.toggled());
    steps::update_step_status(&state.store, step_id, next).await;

    Ok(Json(StepStatusResponse { status: next }))
}

/// POST /api/v1/goals/:id/weeks/:week/tasks
///
/// Generates the target week's 10 tasks. Refused while the prior week is
/// incomplete or when the target week already has tasks.
pub async fn handle_generate_week(
    State(state): State<AppState>,
    Path((goal_id, week)): Path<(Uuid, u32)>,
) -> Result<Json<GenerateWeekResponse>, AppError> {
    if week < 2 {
        return Err(AppError::Validation(
            "week 1 tasks are created with the plan; generation starts at week 2".to_string(),
        ));
    }

    let goal = goals::get_goal(&state.store, goal_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Goal {goal_id} not found")))?;

    let existing = tasks::list_week_tasks(&state.store, goal_id, week).await;
    if !existing.is_empty() {
        return Err(AppError::Conflict(format!(
            "week {week} already has {} tasks",
            existing.len()
        )));
    }

    let prior = tasks::list_week_tasks(&state.store, goal_id, week - 1).await;
    let prior_stats = WeekStats::compute(&prior);
    if !prior_stats.is_complete {
        return Err(AppError::Conflict(format!(
            "week {} is not complete yet ({} tasks pending)",
            week - 1,
            prior_stats.pending
        )));
    }

    let goal_steps = steps::list_steps(&state.store, goal_id).await;
    let completed: Vec<String> = prior
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .map(|t| t.title.clone())
        .collect();
    let skipped: Vec<String> = prior
        .iter()
        .filter(|t| t.status == TaskStatus::Skipped)
        .map(|t| t.title.clone())
        .collect();

    let (drafts, synthetic) = match generate_week_tasks(
        state.llm.as_ref(),
        &goal.title,
        &goal_steps,
        &completed,
        &skipped,
        week,
    )
    .await
    {
        Ok(drafts) => (drafts, false),
        Err(e) => {
            warn!("week {week} task generation failed, using fallback: {e}");
            let active = active_step_numbers(&goal_steps, week);
            (fallback_week_tasks(&active, week), true)
        }
    };

    let new_tasks: Vec<NewWeeklyTask> = drafts
        .iter()
        .map(|t: &DraftTask| NewWeeklyTask {
            id: Uuid::new_v4(),
            goal_id,
            week_number: week,
            task_number: t.task_number,
            title: t.title.clone(),
            description: t.description.clone(),
            status: TaskStatus::Pending,
            step_number: Some(t.step_number),
        })
        .collect();
    let persisted = tasks::insert_tasks(&state.store, &new_tasks).await;

    info!(
        "generated week {week} for goal {goal_id}: synthetic={synthetic}, persisted={persisted}"
    );

    let saved = tasks::list_week_tasks(&state.store, goal_id, week).await;
    Ok(Json(GenerateWeekResponse {
        week,
        tasks: saved,
        synthetic,
        persisted,
    }))
}
