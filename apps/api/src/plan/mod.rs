//! Plan generation: the structured JSON path (`generator`) and the legacy
//! free-text path (`legacy`). The JSON path is authoritative; the legacy
//! parser is kept only for results produced before the schema migration.

pub mod generator;
pub mod handlers;
pub mod legacy;
pub mod prompts;
