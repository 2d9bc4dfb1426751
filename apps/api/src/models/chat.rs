use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message author in a coaching conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A free-form coaching message attached to a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `chat_messages` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_id: Uuid,
    pub role: ChatRole,
    pub content: String,
}

/// A legacy conversation thread (pre-goal-linked chat).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `conversations` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewConversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
}

/// A message within a legacy conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `messages` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: ChatRole,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            r#""assistant""#
        );
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), r#""user""#);
    }

    #[test]
    fn test_chat_message_round_trips() {
        let msg = ChatMessage {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            goal_id: Uuid::new_v4(),
            role: ChatRole::User,
            content: "Як підготуватися до співбесіди?".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let recovered: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.role, ChatRole::User);
        assert_eq!(recovered.content, msg.content);
    }
}
