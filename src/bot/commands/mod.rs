//! Command implementations, shared by the prefix and slash dispatchers.

pub mod close;
pub mod delete;
pub mod hall_of_fame;
pub mod lock;
pub mod membership;
pub mod panel;
pub mod queue;
pub mod reopen;
pub mod tourney;
