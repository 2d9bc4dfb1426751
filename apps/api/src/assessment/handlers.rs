//! Assessment API — the catalog and the completion pipeline.
//!
//! Completion flow: answers → generate_plan (LLM) → fallback on any failure →
//! persist assessment result → goal insert → steps insert → tasks insert.
//! The persistence sequence is strictly ordered and not transactional; a
//! later phase failing does not roll back an earlier one, so each phase
//! reports its own outcome in the response.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::catalog::{self, AssessmentQuestion};
use crate::errors::AppError;
use crate::models::assessment::{AssessmentResult, NewAssessmentResult};
use crate::models::goal::{GoalStatus, NewGoal};
use crate::models::step::{NewStrategicStep, StepStatus};
use crate::models::task::{NewWeeklyTask, TaskStatus};
use crate::plan::generator::{fallback_plan, generate_plan, AnswerMap, GeneratedPlan};
use crate::state::AppState;
use crate::store::{assessments, goals, steps, tasks};

/// A user may hold at most this many goals. Advisory pre-check only: the
/// backend schema does not enforce it, so concurrent creation from two
/// devices can still exceed the limit.
pub const MAX_GOALS_PER_USER: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub user_id: Uuid,
    /// Answers keyed by question id (1–15).
    pub answers: AnswerMap,
}

/// Which persistence phases of the save sequence succeeded.
#[derive(Debug, Default, Serialize)]
pub struct PersistReport {
    pub assessment: bool,
    pub goal: bool,
    pub steps: bool,
    pub tasks: bool,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub goal_id: Uuid,
    pub plan: GeneratedPlan,
    /// True when the plan is the deterministic fallback rather than LLM
    /// output.
    pub synthetic: bool,
    pub persisted: PersistReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/assessment/questions
pub async fn handle_questions() -> Json<&'static [AssessmentQuestion]> {
    Json(catalog::questions())
}

/// GET /api/v1/assessment/results?user_id=...
///
/// Past assessment results, most recent first.
pub async fn handle_results(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Json<Vec<AssessmentResult>> {
    Json(assessments::list_results(&state.store, params.user_id).await)
}

/// POST /api/v1/assessment/complete
pub async fn handle_complete(
    State(state): State<AppState>,
    Json(request): Json<CompleteRequest>,
) -> Result<Json<CompleteResponse>, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }
    if request.answers.keys().any(|id| catalog::question(*id).is_none()) {
        return Err(AppError::Validation(
            "answers reference unknown question ids".to_string(),
        ));
    }

    let existing = goals::list_goals(&state.store, request.user_id).await;
    if existing.len() >= MAX_GOALS_PER_USER {
        return Err(AppError::Conflict(format!(
            "user already holds {MAX_GOALS_PER_USER} goals"
        )));
    }

    info!("Generating plan for user {}", request.user_id);
    let (plan, synthetic) = match generate_plan(state.llm.as_ref(), &request.answers).await {
        Ok(plan) => (plan, false),
        Err(e) => {
            warn!("plan generation failed, using fallback: {e}");
            (fallback_plan(&request.answers), true)
        }
    };

    let (goal_id, persisted) =
        save_plan(&state, request.user_id, &request.answers, &plan, existing.is_empty()).await;

    info!(
        "Plan ready for user {}: goal {goal_id}, score {}, synthetic={synthetic}",
        request.user_id, plan.match_score
    );

    Ok(Json(CompleteResponse {
        goal_id,
        plan,
        synthetic,
        persisted,
    }))
}

/// Runs the goal-insert → steps-insert → tasks-insert sequence.
/// The first goal a user creates becomes primary.
async fn save_plan(
    state: &AppState,
    user_id: Uuid,
    answers: &AnswerMap,
    plan: &GeneratedPlan,
    first_goal: bool,
) -> (Uuid, PersistReport) {
    let mut persisted = PersistReport::default();

    let assessment = NewAssessmentResult {
        id: Uuid::new_v4(),
        user_id,
        answers: serde_json::json!(answers),
        match_score: plan.match_score,
        gap_analysis: plan.gap_analysis.clone(),
    };
    persisted.assessment = assessments::save_result(&state.store, &assessment)
        .await
        .is_some();

    let goal = NewGoal {
        id: Uuid::new_v4(),
        user_id,
        assessment_id: persisted.assessment.then_some(assessment.id),
        title: plan.goal.title.clone(),
        target_salary: plan.goal.target_salary.clone(),
        is_primary: first_goal,
        status: GoalStatus::Active,
    };
    let goal_id = goal.id;
    persisted.goal = goals::create_goal(&state.store, &goal).await.is_some();

    if !persisted.goal {
        // Without a goal row there is nothing to hang steps or tasks on.
        warn!("goal insert failed for user {user_id}; skipping steps and tasks");
        return (goal_id, persisted);
    }

    let new_steps: Vec<NewStrategicStep> = plan
        .steps
        .iter()
        .map(|s| NewStrategicStep {
            id: Uuid::new_v4(),
            goal_id,
            step_number: s.step_number,
            title: s.title.clone(),
            description: s.description.clone(),
            timeframe: s.timeframe.clone(),
            start_week: s.start_week,
            end_week: s.end_week,
            status: StepStatus::Pending,
        })
        .collect();
    persisted.steps = steps::insert_steps(&state.store, &new_steps).await;

    let new_tasks: Vec<NewWeeklyTask> = plan
        .tasks
        .iter()
        .map(|t| NewWeeklyTask {
            id: Uuid::new_v4(),
            goal_id,
            week_number: 1,
            task_number: t.task_number,
            title: t.title.clone(),
            description: t.description.clone(),
            status: TaskStatus::Pending,
            step_number: Some(t.step_number),
        })
        .collect();
    persisted.tasks = tasks::insert_tasks(&state.store, &new_tasks).await;

    if !persisted.steps || !persisted.tasks {
        warn!("partial plan save for goal {goal_id}: steps={}, tasks={}",
            persisted.steps, persisted.tasks);
    }

    (goal_id, persisted)
}
