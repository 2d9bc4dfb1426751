//! Coaching chat: goal-linked messages with LLM replies, plus the legacy
//! conversation threads kept for pre-goal clients.

pub mod handlers;
pub mod prompts;
