//! Business logic layer.
//!
//! Services coordinate between the Discord API, the repository layer, and the
//! in-memory state. Command and interaction handlers stay thin and delegate
//! here.

pub mod session;
pub mod ticket;
