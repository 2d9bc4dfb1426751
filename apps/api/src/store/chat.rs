use tracing::warn;
use uuid::Uuid;

use crate::models::chat::{ChatMessage, NewChatMessage};
use crate::store::client::{Query, StoreClient};

const TABLE: &str = "chat_messages";

pub async fn append_chat_message(
    store: &StoreClient,
    message: &NewChatMessage,
) -> Option<ChatMessage> {
    match store.insert::<_, ChatMessage>(TABLE, &[message]).await {
        Ok(mut created) => created.pop(),
        Err(e) => {
            warn!("append_chat_message failed: {e}");
            None
        }
    }
}

pub async fn list_chat_messages(store: &StoreClient, goal_id: Uuid) -> Vec<ChatMessage> {
    let query = Query::new().eq("goal_id", goal_id).order_asc("created_at");
    match store.select(TABLE, &query).await {
        Ok(messages) => messages,
        Err(e) => {
            warn!("list_chat_messages failed for goal {goal_id}: {e}");
            Vec::new()
        }
    }
}

pub async fn delete_chat_by_goal(store: &StoreClient, goal_id: Uuid) -> bool {
    let query = Query::new().eq("goal_id", goal_id);
    match store.delete(TABLE, &query).await {
        Ok(()) => true,
        Err(e) => {
            warn!("delete_chat_by_goal failed for goal {goal_id}: {e}");
            false
        }
    }
}
