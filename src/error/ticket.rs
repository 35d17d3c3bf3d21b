use thiserror::Error;

/// Ticket-domain rejections.
///
/// Each variant's `Display` output is the exact message shown to the user who
/// triggered it, so command and interaction handlers can reply with the error
/// directly instead of mapping variants to strings at every call site.
#[derive(Error, Debug)]
pub enum TicketError {
    /// Caller lacks a staff role for a staff-only operation.
    #[error("You do not have permission to use this command.")]
    NotStaff,

    /// The command was used somewhere other than a guild text channel.
    #[error("This command can only be used in a server text channel.")]
    NotGuildChannel,

    /// The channel is not in an active ticket category.
    #[error("This command can only be used in an open ticket channel.")]
    NotActiveTicket,

    /// The channel is not in an archive category.
    #[error("This command can only be used in a closed ticket channel.")]
    NotClosedTicket,

    /// The channel is in neither an active nor an archive ticket category.
    #[error("This command can only be used in a ticket channel.")]
    NotTicketChannel,

    /// The opener already has the maximum number of open tickets.
    #[error("You already have {limit} open tickets. Please close one before opening another.")]
    TooManyOpenTickets { limit: usize },

    /// The opener created a ticket too recently.
    #[error("You're opening tickets too quickly. Please wait {wait} before trying again.")]
    CooldownActive { wait: String },

    /// The active category is at the hard capacity ceiling.
    #[error(
        "The support queue is completely full ({count}/{max}). Please try again in a few minutes."
    )]
    CategoryFull { count: usize, max: usize },

    /// Reopen refused because the active category is at the hard ceiling.
    #[error(
        "Cannot reopen this ticket: the support queue is full ({count}/{max}). Please try again later."
    )]
    ReopenCategoryFull { count: usize, max: usize },
}
