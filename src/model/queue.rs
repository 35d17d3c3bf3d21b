/// Point-in-time view of the support queue, derived entirely from channel
/// names in the active and archive categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueSnapshot {
    /// No open tickets.
    Empty,
    Serving {
        /// Ticket number currently being served.
        number: u16,
        /// Open tickets behind the one being served.
        waiting: usize,
    },
}

impl QueueSnapshot {
    /// Estimates which ticket is being served.
    ///
    /// The heuristic: the ticket after the highest closed number is next in
    /// line, so if `max_closed + 1` is still open it is the one being served.
    /// When that slot is absent (number skipped or already closed out of
    /// order) the lowest open number stands in. With no closures yet the
    /// lowest open number is being served.
    pub fn estimate(active_numbers: &[u16], max_closed: Option<u16>) -> Self {
        let Some(&min_active) = active_numbers.iter().min() else {
            return QueueSnapshot::Empty;
        };
        let number = match max_closed {
            Some(max) if active_numbers.contains(&(max.wrapping_add(1))) => max.wrapping_add(1),
            _ => min_active,
        };
        QueueSnapshot::Serving {
            number,
            waiting: active_numbers.len() - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue() {
        assert_eq!(QueueSnapshot::estimate(&[], None), QueueSnapshot::Empty);
        assert_eq!(QueueSnapshot::estimate(&[], Some(12)), QueueSnapshot::Empty);
    }

    #[test]
    fn successor_of_max_closed_is_serving() {
        // Closed up through 4, ticket 5 open: 5 is being served
        let snap = QueueSnapshot::estimate(&[5, 6, 7], Some(4));
        assert_eq!(snap, QueueSnapshot::Serving { number: 5, waiting: 2 });
    }

    #[test]
    fn missing_successor_falls_back_to_min_active() {
        // Active {3,4,6}, max closed 4: 5 is gone, so the lowest open wins
        let snap = QueueSnapshot::estimate(&[3, 4, 6], Some(4));
        assert_eq!(snap, QueueSnapshot::Serving { number: 3, waiting: 2 });
    }

    #[test]
    fn no_closures_serves_lowest_open() {
        let snap = QueueSnapshot::estimate(&[12, 14, 13], None);
        assert_eq!(snap, QueueSnapshot::Serving { number: 12, waiting: 2 });
    }

    #[test]
    fn single_ticket_has_no_waiting() {
        let snap = QueueSnapshot::estimate(&[8], Some(7));
        assert_eq!(snap, QueueSnapshot::Serving { number: 8, waiting: 0 });
    }
}
