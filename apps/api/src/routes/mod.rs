pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::chat::handlers as chat;
use crate::goals::handlers as goals;
use crate::plan::handlers as plan;
use crate::progress::handlers as progress;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/assessment/questions",
            get(assessment::handle_questions),
        )
        .route(
            "/api/v1/assessment/complete",
            post(assessment::handle_complete),
        )
        .route(
            "/api/v1/assessment/results",
            get(assessment::handle_results),
        )
        // Legacy result parsing
        .route("/api/v1/results/parse", post(plan::handle_parse_results))
        // Goals API
        .route(
            "/api/v1/goals",
            get(goals::handle_list_goals).post(goals::handle_create_goal),
        )
        .route(
            "/api/v1/goals/:id",
            get(goals::handle_get_goal).delete(goals::handle_delete_goal),
        )
        .route("/api/v1/goals/:id/primary", post(goals::handle_set_primary))
        .route(
            "/api/v1/goals/:id/status",
            patch(goals::handle_goal_status),
        )
        // Progress API
        .route(
            "/api/v1/goals/:id/progress",
            get(progress::handle_progress),
        )
        .route(
            "/api/v1/goals/:id/weeks/:week",
            get(progress::handle_get_week),
        )
        .route(
            "/api/v1/goals/:id/weeks/:week/tasks",
            post(progress::handle_generate_week),
        )
        .route(
            "/api/v1/tasks/:id/status",
            patch(progress::handle_task_status),
        )
        .route(
            "/api/v1/steps/:id/status",
            patch(progress::handle_step_status),
        )
        // Coaching chat
        .route(
            "/api/v1/goals/:id/chat",
            get(chat::handle_list_chat)
                .post(chat::handle_send_chat)
                .delete(chat::handle_clear_chat),
        )
        // Legacy conversations
        .route(
            "/api/v1/conversations",
            get(chat::handle_list_conversations).post(chat::handle_create_conversation),
        )
        .route(
            "/api/v1/conversations/:id",
            delete(chat::handle_delete_conversation),
        )
        .route(
            "/api/v1/conversations/:id/messages",
            get(chat::handle_list_messages).post(chat::handle_append_message),
        )
        .with_state(state)
}
