//! Axum route handlers for the coaching chat and legacy conversations.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::chat::prompts::{COACH_FALLBACK_REPLY, COACH_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::GenerationConfig;
use crate::models::chat::{
    ChatMessage, ChatRole, Conversation, Message, NewChatMessage, NewConversation, NewMessage,
};
use crate::state::AppState;
use crate::store::{chat, conversations, goals};

/// How many prior messages feed the coach prompt.
const HISTORY_WINDOW: usize = 10;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SendChatRequest {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: ChatRole,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Goal-linked coaching chat
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/goals/:id/chat
pub async fn handle_list_chat(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> Json<Vec<ChatMessage>> {
    Json(chat::list_chat_messages(&state.store, goal_id).await)
}

/// POST /api/v1/goals/:id/chat
///
/// Appends the user message, asks the coach for a reply, and appends that
/// too. Reply generation failures degrade to a canned reply rather than an
/// error response.
pub async fn handle_send_chat(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
    Json(request): Json<SendChatRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let goal = goals::get_goal(&state.store, goal_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Goal {goal_id} not found")))?;

    let history = chat::list_chat_messages(&state.store, goal_id).await;

    let user_message = NewChatMessage {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        goal_id,
        role: ChatRole::User,
        content: request.content.clone(),
    };
    chat::append_chat_message(&state.store, &user_message).await;

    let history_block = history
        .iter()
        .rev()
        .take(HISTORY_WINDOW)
        .rev()
        .map(|m| {
            let who = match m.role {
                ChatRole::User => "Користувач",
                ChatRole::Assistant => "Коуч",
            };
            format!("{who}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = COACH_PROMPT_TEMPLATE
        .replace("{goal_title}", &goal.title)
        .replace("{history}", &history_block)
        .replace("{message}", &request.content);

    let reply = match state
        .llm
        .generate(&prompt, &GenerationConfig::default())
        .await
    {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => COACH_FALLBACK_REPLY.to_string(),
        Err(e) => {
            warn!("coach reply generation failed for goal {goal_id}: {e}");
            COACH_FALLBACK_REPLY.to_string()
        }
    };

    let assistant_message = NewChatMessage {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        goal_id,
        role: ChatRole::Assistant,
        content: reply.clone(),
    };
    if let Some(saved) = chat::append_chat_message(&state.store, &assistant_message).await {
        return Ok(Json(saved));
    }

    // The reply could not be persisted; still return it so the user sees an
    // answer. The log is the only record of the failure.
    warn!("assistant reply for goal {goal_id} was not persisted");
    Ok(Json(ChatMessage {
        id: assistant_message.id,
        user_id: request.user_id,
        goal_id,
        role: ChatRole::Assistant,
        content: reply,
        created_at: chrono::Utc::now(),
    }))
}

/// DELETE /api/v1/goals/:id/chat
///
/// Clears the goal's chat history (delete-by-owner on `chat_messages`).
pub async fn handle_clear_chat(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> StatusCode {
    chat::delete_chat_by_goal(&state.store, goal_id).await;
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Legacy conversations
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/conversations
pub async fn handle_create_conversation(
    State(state): State<AppState>,
    Json(request): Json<CreateConversationRequest>,
) -> Result<(StatusCode, Json<Conversation>), AppError> {
    let new_conversation = NewConversation {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        title: request.title,
    };
    let created = conversations::create_conversation(&state.store, &new_conversation)
        .await
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("conversation could not be saved")))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/conversations?user_id=...
pub async fn handle_list_conversations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Json<Vec<Conversation>> {
    Json(conversations::list_conversations(&state.store, params.user_id).await)
}

/// GET /api/v1/conversations/:id/messages
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Json<Vec<Message>> {
    Json(conversations::list_messages(&state.store, conversation_id).await)
}

/// POST /api/v1/conversations/:id/messages
pub async fn handle_append_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(request): Json<AppendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    let new_message = NewMessage {
        id: Uuid::new_v4(),
        conversation_id,
        role: request.role,
        content: request.content,
    };
    let created = conversations::append_message(&state.store, &new_message)
        .await
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("message could not be saved")))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/v1/conversations/:id
pub async fn handle_delete_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> StatusCode {
    conversations::delete_conversation(&state.store, conversation_id).await;
    StatusCode::NO_CONTENT
}
