//! Generation counter for superseding in-flight lookups.
//!
//! Every lookup takes a [`Ticket`] when it starts. Only the holder of the
//! most recently issued ticket may apply its result; older responses that
//! arrive late are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation number handed to a single lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw generation number.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cloneable, monotonically increasing ticket dispenser.
///
/// Clones share the same counter, so tickets can be issued and checked from
/// several tasks.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: Arc<AtomicU64>,
}

impl RequestSequence {
    /// Create a new sequence. No ticket has been issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Check whether `ticket` is still the most recently issued one.
    #[must_use]
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Generation of the most recently issued ticket (0 if none).
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let sequence = RequestSequence::new();
        assert_eq!(sequence.latest(), 0);

        let first = sequence.issue();
        let second = sequence.issue();
        assert!(second > first);
        assert_eq!(second.generation(), 2);
        assert_eq!(sequence.latest(), 2);
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let sequence = RequestSequence::new();
        let first = sequence.issue();
        assert!(sequence.is_latest(first));

        let second = sequence.issue();
        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
    }

    #[test]
    fn test_clones_share_counter() {
        let sequence = RequestSequence::new();
        let clone = sequence.clone();

        let ticket = sequence.issue();
        assert!(clone.is_latest(ticket));

        clone.issue();
        assert!(!sequence.is_latest(ticket));
    }

    #[tokio::test]
    async fn test_issue_from_many_tasks() {
        let sequence = RequestSequence::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let sequence = sequence.clone();
            handles.push(tokio::spawn(async move { sequence.issue() }));
        }

        let mut generations = Vec::new();
        for handle in handles {
            generations.push(handle.await.unwrap().generation());
        }
        generations.sort_unstable();
        generations.dedup();

        assert_eq!(generations.len(), 16);
        assert_eq!(sequence.latest(), 16);
    }

    #[test]
    fn test_ticket_display() {
        let sequence = RequestSequence::new();
        assert_eq!(sequence.issue().to_string(), "#1");
    }
}
