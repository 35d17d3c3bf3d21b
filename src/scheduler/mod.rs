//! Background jobs driven by the cron scheduler.

pub mod queue_dashboard;
