//! Study planning: the day-by-day scheduler, plan prose generation and plan storage.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod scheduler;
pub mod store;
