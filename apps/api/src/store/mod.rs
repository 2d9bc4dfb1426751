//! Persistence Gateway — typed operations over the remote resource
//! collections (`goals`, `strategic_steps`, `weekly_tasks`,
//! `assessment_results`, `conversations`, `messages`, `chat_messages`).
//!
//! Every public operation here is failure-absorbing by contract: errors are
//! caught, logged, and converted to a safe default (empty list, `false`,
//! `None`). Callers never see a propagated error from this layer.

pub mod assessments;
pub mod chat;
pub mod client;
pub mod conversations;
pub mod goals;
pub mod steps;
pub mod tasks;

pub use client::StoreClient;
