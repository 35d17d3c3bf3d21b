//! Error types for the bot.
//!
//! This module provides the application's error hierarchy. The `AppError` enum
//! serves as the top-level error type that wraps domain-specific errors, while
//! `TicketError` carries the user-facing rejections raised by ticket
//! operations. Handlers reply with `TicketError` messages directly and log
//! everything else.

pub mod config;
pub mod ticket;

use thiserror::Error;

use crate::error::{config::ConfigError, ticket::TicketError};

/// Top-level application error type.
///
/// Aggregates all error types that can occur in the application. Most variants
/// use `#[from]` for automatic conversion via `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Ticket-domain rejection with a user-facing message.
    #[error(transparent)]
    TicketErr(#[from] TicketError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message safe to show the user who triggered the error.
    ///
    /// Ticket rejections carry their own wording; everything else collapses to
    /// a generic message with the details kept for the server-side log.
    pub fn user_facing(&self) -> String {
        match self {
            AppError::TicketErr(err) => err.to_string(),
            _ => "Something went wrong. Please try again later.".to_string(),
        }
    }
}
