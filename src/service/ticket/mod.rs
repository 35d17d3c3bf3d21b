//! Ticket subsystem: gating, lifecycle, archival, and the queue dashboard.

pub mod capacity;
pub mod counter;
pub mod lifecycle;
pub mod queue;
pub mod rate_limit;
pub mod transcript;
