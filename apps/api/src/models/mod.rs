pub mod assessment;
pub mod chat;
pub mod goal;
pub mod step;
pub mod task;
