//! Domain models for the ticket system.
//!
//! These types carry no I/O. Channel-name and topic codecs live here so the
//! lifecycle and transcript services share one definition of the wire formats.

pub mod queue;
pub mod ticket;
