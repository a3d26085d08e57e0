use std::collections::HashMap;

use tokio::sync::Mutex;

/// Proof that a request was issued; compare against the tracker when the
/// response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Last-request-wins bookkeeping per resource key.
///
/// Nothing is cancelled; a response whose ticket is no longer the latest
/// for its key is simply not applied.
#[derive(Debug, Default)]
pub struct Supersede {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next: u64,
    latest: HashMap<String, u64>,
}

impl Supersede {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `key`, superseding any earlier one.
    pub async fn issue(&self, key: impl Into<String>) -> Ticket {
        let key = key.into();
        let mut inner = self.inner.lock().await;
        inner.next += 1;
        let seq = inner.next;
        inner.latest.insert(key.clone(), seq);
        Ticket { key, seq }
    }

    /// Whether `ticket` is still the latest for its key.
    pub async fn is_current(&self, ticket: &Ticket) -> bool {
        let inner = self.inner.lock().await;
        inner.latest.get(&ticket.key) == Some(&ticket.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_ticket_wins() {
        let tracker = Supersede::new();
        let first = tracker.issue("schedule").await;
        let second = tracker.issue("schedule").await;

        // Completion order does not matter.
        assert!(tracker.is_current(&second).await);
        assert!(!tracker.is_current(&first).await);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let tracker = Supersede::new();
        let feed = tracker.issue("feed:https://a.example/x.csv").await;
        let ranking = tracker.issue("ranking").await;
        let _newer_ranking = tracker.issue("ranking").await;

        assert!(tracker.is_current(&feed).await);
        assert!(!tracker.is_current(&ranking).await);
        assert_eq!(feed.key(), "feed:https://a.example/x.csv");
    }
}
