use serenity::all::{ChannelId, Colour, CreateEmbed, CreateMessage, Http, RoleId};
use std::sync::Arc;

/// Hard ceiling on channels in a ticket category. Creation is refused here.
pub const HARD_CAPACITY: usize = 50;

/// Soft threshold at which admins are warned and archive eviction begins.
pub const SOFT_CAPACITY: usize = 40;

/// Outcome of a capacity check against an active category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Allow,
    /// Creation proceeds, but an admin alert should be dispatched.
    AllowWithWarning,
    Deny,
}

/// Decides whether a new ticket may be admitted to a category of `size`
/// channels.
pub fn check_admission(size: usize) -> Admission {
    if size >= HARD_CAPACITY {
        Admission::Deny
    } else if size >= SOFT_CAPACITY {
        Admission::AllowWithWarning
    } else {
        Admission::Allow
    }
}

/// How many of the oldest archived tickets must be evicted before one more
/// ticket can move into an archive category of `size` channels.
///
/// The target is at most `SOFT_CAPACITY - 1` channels before the insertion,
/// so the archive never sits at the warning threshold after a close.
pub fn eviction_count(size: usize) -> usize {
    if size >= SOFT_CAPACITY {
        size - SOFT_CAPACITY + 1
    } else {
        0
    }
}

/// Dispatches a high-traffic alert to the admin channel without blocking the
/// caller.
///
/// Alerts fire once per creation event above the soft threshold with no
/// de-duplication. Delivery failures are logged and swallowed; the admission
/// path never waits on or fails because of this message.
pub fn spawn_capacity_alert(
    http: Arc<Http>,
    alert_channel: ChannelId,
    alert_role: RoleId,
    category_name: String,
    size: usize,
) {
    tokio::spawn(async move {
        let embed = CreateEmbed::new()
            .title("⚠️ High Traffic Alert")
            .description(format!(
                "The **{}** category is filling up: {}/{} channels in use.",
                category_name, size, HARD_CAPACITY
            ))
            .colour(Colour::ORANGE);

        let message = CreateMessage::new()
            .content(format!("<@&{}>", alert_role.get()))
            .embed(embed);

        if let Err(e) = alert_channel.send_message(&http, message).await {
            tracing::error!("Failed to send capacity alert: {:?}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_soft_threshold_allows() {
        assert_eq!(check_admission(0), Admission::Allow);
        assert_eq!(check_admission(39), Admission::Allow);
    }

    #[test]
    fn soft_threshold_warns() {
        assert_eq!(check_admission(40), Admission::AllowWithWarning);
        assert_eq!(check_admission(49), Admission::AllowWithWarning);
    }

    #[test]
    fn hard_threshold_denies() {
        assert_eq!(check_admission(50), Admission::Deny);
        assert_eq!(check_admission(51), Admission::Deny);
    }

    #[test]
    fn no_eviction_below_soft_threshold() {
        assert_eq!(eviction_count(0), 0);
        assert_eq!(eviction_count(39), 0);
    }

    #[test]
    fn eviction_leaves_room_below_soft_threshold() {
        // 40 channels: evict 1 so insertion lands at 40 again, never above
        assert_eq!(eviction_count(40), 1);
        assert_eq!(eviction_count(45), 6);
        assert_eq!(eviction_count(50), 11);
    }
}
