//! App logic and orchestration.

pub mod actions;
pub mod core;
pub mod events;
pub mod loops;
