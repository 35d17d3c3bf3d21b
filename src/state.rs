//! Application state shared across all event handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources
//! and in-memory bookkeeping the bot needs. The state is initialized once
//! during startup, wrapped in an `Arc`, and handed to the event handler and
//! the scheduler.
//!
//! The in-memory fields (rate limiter, counters, lock timers, dashboard
//! pointer) deliberately reset on restart; durable state lives in the
//! database and in Discord itself (channel names and topics).

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, MessageId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::AppError;
use crate::service::ticket::counter::TicketCounters;
use crate::service::ticket::rate_limit::RateLimiter;

/// Application state containing shared resources and in-memory bookkeeping.
///
/// All mutable fields use `std::sync::Mutex` rather than the tokio mutex:
/// every critical section is a short, synchronous map or counter update with
/// no `.await` inside, so the std lock is the right tool.
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Immutable configuration loaded from the environment at startup.
    pub config: Config,

    /// Per-user open-ticket counts and creation cooldowns.
    pub rate_limiter: Mutex<RateLimiter>,

    /// Rolling ticket counters, one per pipeline.
    pub counters: Mutex<TicketCounters>,

    /// Pending auto-reopen timers for locked tickets, keyed by channel.
    ///
    /// Locking a channel that already has a timer aborts the old handle and
    /// replaces it, so a re-lock restarts the countdown.
    pub lock_tasks: Mutex<HashMap<ChannelId, JoinHandle<()>>>,

    /// Message id of the queue dashboard currently being edited in place.
    ///
    /// `None` until the first dashboard post after startup.
    pub dashboard_message: Mutex<Option<MessageId>>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Application configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config,
            rate_limiter: Mutex::new(RateLimiter::new()),
            counters: Mutex::new(TicketCounters::new()),
            lock_tasks: Mutex::new(HashMap::new()),
            dashboard_message: Mutex::new(None),
        }
    }
}

/// Acquires a state mutex, converting lock poisoning into an application
/// error instead of panicking inside an event handler.
pub fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::InternalError("state lock poisoned".to_string()))
}
