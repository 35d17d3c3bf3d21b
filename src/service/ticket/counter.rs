use crate::model::ticket::{TicketKind, MAX_TICKET_NUMBER};

/// Rolling ticket number generator for one pipeline.
///
/// Numbers run 1 through 999 and wrap; uniqueness among live channels is
/// effectively guaranteed because tickets are archived long before the
/// counter comes back around.
pub struct TicketCounter {
    next: u16,
}

impl TicketCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Takes the next ticket number, advancing and wrapping the counter.
    pub fn take(&mut self) -> u16 {
        let number = self.next;
        self.next = if self.next >= MAX_TICKET_NUMBER {
            1
        } else {
            self.next + 1
        };
        number
    }

    /// Resets the counter to 1. Used when a tournament session starts.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for TicketCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The pair of counters, one per pipeline.
pub struct TicketCounters {
    tournament: TicketCounter,
    pre_tournament: TicketCounter,
}

impl TicketCounters {
    pub fn new() -> Self {
        Self {
            tournament: TicketCounter::new(),
            pre_tournament: TicketCounter::new(),
        }
    }

    pub fn for_kind(&mut self, kind: TicketKind) -> &mut TicketCounter {
        match kind {
            TicketKind::Tournament => &mut self.tournament,
            TicketKind::PreTournament => &mut self.pre_tournament,
        }
    }

    /// Resets both counters at once.
    pub fn reset_all(&mut self) {
        self.tournament.reset();
        self.pre_tournament.reset();
    }
}

impl Default for TicketCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_from_one() {
        let mut counter = TicketCounter::new();
        assert_eq!(counter.take(), 1);
        assert_eq!(counter.take(), 2);
        assert_eq!(counter.take(), 3);
    }

    #[test]
    fn wraps_at_999() {
        let mut counter = TicketCounter::new();
        for _ in 0..998 {
            counter.take();
        }
        assert_eq!(counter.take(), 999);
        assert_eq!(counter.take(), 1);
    }

    #[test]
    fn reset_returns_to_one() {
        let mut counter = TicketCounter::new();
        counter.take();
        counter.take();
        counter.reset();
        assert_eq!(counter.take(), 1);
    }

    #[test]
    fn pipelines_count_independently() {
        let mut counters = TicketCounters::new();
        assert_eq!(counters.for_kind(TicketKind::Tournament).take(), 1);
        assert_eq!(counters.for_kind(TicketKind::Tournament).take(), 2);
        assert_eq!(counters.for_kind(TicketKind::PreTournament).take(), 1);
    }
}
