//! Store Entry Module
//!
//! Defines the structure for individual in-process store entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Payload ==
/// What a key holds: a plain value or a list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

// == Store Entry ==
/// Represents a single stored key with its payload and expiration.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored payload
    pub payload: Payload,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoreEntry {
    // == Constructors ==
    /// Creates a plain value entry without expiration.
    pub fn bytes(value: Vec<u8>) -> Self {
        Self {
            payload: Payload::Bytes(value),
            expires_at: None,
        }
    }

    /// Creates an empty list entry without expiration.
    pub fn list() -> Self {
        Self {
            payload: Payload::List(Vec::new()),
            expires_at: None,
        }
    }

    // == Expire ==
    /// Sets the entry to expire `ttl` from now, replacing any previous deadline.
    pub fn expire_in(&mut self, ttl: Duration) {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        self.expires_at = Utc::now().checked_add_signed(ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline, so a
    /// zero TTL expires immediately.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Utc::now() >= deadline,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = StoreEntry::bytes(b"test_value".to_vec());

        assert_eq!(entry.payload, Payload::Bytes(b"test_value".to_vec()));
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_with_ttl() {
        let mut entry = StoreEntry::list();
        entry.expire_in(Duration::from_secs(10));

        assert!(!entry.is_expired());
        let remaining = entry.expires_at.unwrap() - Utc::now();
        assert!(remaining.num_milliseconds() <= 10_000);
        assert!(remaining.num_milliseconds() >= 9_000);
    }

    #[test]
    fn test_entry_expiration() {
        let mut entry = StoreEntry::bytes(b"v".to_vec());
        entry.expire_in(Duration::from_millis(200));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(300));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let mut entry = StoreEntry::bytes(b"v".to_vec());
        entry.expire_in(Duration::ZERO);

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
