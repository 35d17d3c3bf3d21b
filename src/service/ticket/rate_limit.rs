use chrono::{DateTime, Duration, Utc};
use serenity::all::{ChannelId, UserId};
use std::collections::{HashMap, HashSet};

use crate::error::ticket::TicketError;

/// Maximum tickets one user may have open at the same time.
pub const MAX_OPEN_TICKETS: usize = 3;

/// Cooldown between ticket creations by the same user.
pub const TICKET_COOLDOWN_SECS: i64 = 180;

/// Per-user creation throttling.
///
/// Tracks which ticket channels each user currently has open and when they
/// last opened one. Keying the open set by channel id makes unregistering
/// idempotent per ticket, so the close and delete paths can both report the
/// same channel without double-freeing a slot. Both maps live only in memory;
/// after a restart users start from a clean slate, which errs on the side of
/// letting people in.
pub struct RateLimiter {
    open_tickets: HashMap<UserId, HashSet<ChannelId>>,
    last_created: HashMap<UserId, DateTime<Utc>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            open_tickets: HashMap::new(),
            last_created: HashMap::new(),
        }
    }

    /// Checks whether `user` may open a ticket right now.
    ///
    /// The open-ticket limit is evaluated before the cooldown, so a user at
    /// the limit always sees the limit message even when a cooldown is also
    /// running.
    ///
    /// # Arguments
    /// - `user` - The prospective opener
    /// - `now` - The current time, passed in so tests can control the clock
    pub fn check(&self, user: UserId, now: DateTime<Utc>) -> Result<(), TicketError> {
        if self.open_count(user) >= MAX_OPEN_TICKETS {
            return Err(TicketError::TooManyOpenTickets {
                limit: MAX_OPEN_TICKETS,
            });
        }

        if let Some(&last) = self.last_created.get(&user) {
            let elapsed = now - last;
            let cooldown = Duration::seconds(TICKET_COOLDOWN_SECS);
            if elapsed < cooldown {
                let remaining = cooldown - elapsed;
                return Err(TicketError::CooldownActive {
                    wait: format_wait(remaining),
                });
            }
        }

        Ok(())
    }

    /// Records a successful ticket creation or reopen for `user`.
    pub fn register(&mut self, user: UserId, ticket: ChannelId, now: DateTime<Utc>) {
        self.open_tickets.entry(user).or_default().insert(ticket);
        self.last_created.insert(user, now);
    }

    /// Records that `ticket` is no longer open for `user`, freeing its slot.
    ///
    /// Idempotent: reporting a ticket that was already unregistered changes
    /// nothing. The cooldown timestamp is left untouched; closing a ticket
    /// does not shorten the wait before the next one.
    pub fn unregister(&mut self, user: UserId, ticket: ChannelId) {
        if let Some(tickets) = self.open_tickets.get_mut(&user) {
            tickets.remove(&ticket);
            if tickets.is_empty() {
                self.open_tickets.remove(&user);
            }
        }
    }

    /// Current open-ticket count for `user`.
    pub fn open_count(&self, user: UserId) -> usize {
        self.open_tickets.get(&user).map_or(0, HashSet::len)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a remaining wait as `"2m 37s"`, or `"45s"` when under a minute.
fn format_wait(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(1);
    let minutes = total / 60;
    let seconds = total % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ticket(id: u64) -> ChannelId {
        ChannelId::new(id)
    }

    #[test]
    fn fresh_user_passes() {
        let limiter = RateLimiter::new();
        assert!(limiter.check(UserId::new(1), at(0)).is_ok());
    }

    #[test]
    fn second_ticket_within_cooldown_is_rejected() {
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        limiter.register(user, ticket(100), at(0));
        let err = limiter.check(user, at(10)).unwrap_err();
        match err {
            TicketError::CooldownActive { wait } => assert_eq!(wait, "2m 50s"),
            other => panic!("expected cooldown, got {other:?}"),
        }
    }

    #[test]
    fn wait_under_a_minute_omits_minutes() {
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        limiter.register(user, ticket(100), at(0));
        let err = limiter.check(user, at(140)).unwrap_err();
        match err {
            TicketError::CooldownActive { wait } => assert_eq!(wait, "40s"),
            other => panic!("expected cooldown, got {other:?}"),
        }
    }

    #[test]
    fn cooldown_expires_after_three_minutes() {
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        limiter.register(user, ticket(100), at(0));
        assert!(limiter.check(user, at(TICKET_COOLDOWN_SECS)).is_ok());
    }

    #[test]
    fn fourth_open_ticket_is_rejected() {
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        for i in 0..3 {
            limiter.register(user, ticket(100 + i), at(i as i64 * 600));
        }
        let err = limiter.check(user, at(3 * 600)).unwrap_err();
        assert!(matches!(err, TicketError::TooManyOpenTickets { limit: 3 }));
    }

    #[test]
    fn limit_outranks_cooldown() {
        // At the limit and inside the cooldown: the limit message wins
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        for i in 0..3 {
            limiter.register(user, ticket(100 + i), at(0));
        }
        let err = limiter.check(user, at(5)).unwrap_err();
        assert!(matches!(err, TicketError::TooManyOpenTickets { .. }));
    }

    #[test]
    fn close_frees_a_slot_but_not_the_cooldown() {
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        for i in 0..3 {
            limiter.register(user, ticket(100 + i), at(0));
        }
        limiter.unregister(user, ticket(100));
        assert_eq!(limiter.open_count(user), 2);
        // Slot is free, but the cooldown from the last creation still applies
        let err = limiter.check(user, at(5)).unwrap_err();
        assert!(matches!(err, TicketError::CooldownActive { .. }));
        assert!(limiter.check(user, at(TICKET_COOLDOWN_SECS + 1)).is_ok());
    }

    #[test]
    fn close_then_delete_frees_exactly_one_slot() {
        // Closing moves a ticket to the archive; deleting it afterwards
        // reports the same channel again. The second report must be a no-op
        // or the user ends up allowed a fourth concurrent ticket.
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        for i in 0..3 {
            limiter.register(user, ticket(100 + i), at(0));
        }

        limiter.unregister(user, ticket(100));
        limiter.unregister(user, ticket(100));
        assert_eq!(limiter.open_count(user), 2);

        limiter.register(user, ticket(200), at(TICKET_COOLDOWN_SECS));
        assert_eq!(limiter.open_count(user), 3);
        let err = limiter
            .check(user, at(2 * TICKET_COOLDOWN_SECS))
            .unwrap_err();
        assert!(matches!(err, TicketError::TooManyOpenTickets { .. }));
    }

    #[test]
    fn unregister_unknown_ticket_is_harmless() {
        let mut limiter = RateLimiter::new();
        let user = UserId::new(1);
        limiter.unregister(user, ticket(100));
        assert_eq!(limiter.open_count(user), 0);
    }
}
