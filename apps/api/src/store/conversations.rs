use tracing::warn;
use uuid::Uuid;

use crate::models::chat::{Conversation, Message, NewConversation, NewMessage};
use crate::store::client::{Query, StoreClient};

const CONVERSATIONS: &str = "conversations";
const MESSAGES: &str = "messages";

/// Messages returned per conversation page.
const MESSAGE_LIMIT: u32 = 100;

pub async fn create_conversation(
    store: &StoreClient,
    conversation: &NewConversation,
) -> Option<Conversation> {
    match store
        .insert::<_, Conversation>(CONVERSATIONS, &[conversation])
        .await
    {
        Ok(mut created) => created.pop(),
        Err(e) => {
            warn!("create_conversation failed: {e}");
            None
        }
    }
}

pub async fn list_conversations(store: &StoreClient, user_id: Uuid) -> Vec<Conversation> {
    let query = Query::new().eq("user_id", user_id).order_desc("created_at");
    match store.select(CONVERSATIONS, &query).await {
        Ok(conversations) => conversations,
        Err(e) => {
            warn!("list_conversations failed for user {user_id}: {e}");
            Vec::new()
        }
    }
}

pub async fn append_message(store: &StoreClient, message: &NewMessage) -> Option<Message> {
    match store.insert::<_, Message>(MESSAGES, &[message]).await {
        Ok(mut created) => created.pop(),
        Err(e) => {
            warn!("append_message failed: {e}");
            None
        }
    }
}

pub async fn list_messages(store: &StoreClient, conversation_id: Uuid) -> Vec<Message> {
    let query = Query::new()
        .eq("conversation_id", conversation_id)
        .order_asc("created_at")
        .limit(MESSAGE_LIMIT);
    match store.select(MESSAGES, &query).await {
        Ok(messages) => messages,
        Err(e) => {
            warn!("list_messages failed for conversation {conversation_id}: {e}");
            Vec::new()
        }
    }
}

/// Deletes the conversation row. The backend cascades to its messages.
pub async fn delete_conversation(store: &StoreClient, id: Uuid) -> bool {
    let query = Query::new().eq("id", id);
    match store.delete(CONVERSATIONS, &query).await {
        Ok(()) => true,
        Err(e) => {
            warn!("delete_conversation failed for {id}: {e}");
            false
        }
    }
}
