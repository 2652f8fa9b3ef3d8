//! Cookie jar trait and the in-memory implementation.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::read_cookie;

/// Abstraction over cookie storage.
///
/// The basket takes its jar as an explicit constructor dependency, so the
/// same state logic runs against an in-memory jar in tests and a
/// file-backed jar in the CLI.
pub trait CookieJar {
    /// Value stored under `name`, or `None` when absent or expired.
    fn get(&self, name: &str) -> Option<String>;

    /// Store `value` under `name`, expiring after `max_age_secs`.
    ///
    /// Storage failures are not surfaced to the caller; implementations
    /// log and continue, the way a browser swallows a rejected cookie
    /// write.
    fn set(&mut self, name: &str, value: &str, max_age_secs: u64);

    /// Drop `name` if present. Idempotent.
    fn remove(&mut self, name: &str);

    /// Drop every stored cookie.
    fn clear(&mut self);
}

/// A stored cookie value with its expiry instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    pub fn new(value: impl Into<String>, max_age_secs: u64) -> Self {
        Self {
            value: value.into(),
            expires_at: Utc::now() + Duration::seconds(max_age_secs as i64),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// In-memory jar for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryJar {
    entries: HashMap<String, StoredCookie>,
}

impl MemoryJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a jar from a `Cookie:`-style header string, giving every entry
    /// `max_age_secs` to live. This is how ambient browser cookies enter
    /// the system in embedding contexts.
    pub fn from_header(header: &str, max_age_secs: u64) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';') {
            let Some((key, _)) = pair.trim().split_once('=') else {
                continue;
            };
            if jar.entries.contains_key(key) {
                continue;
            }
            if let Some(value) = read_cookie(header, key) {
                jar.set(key, &value, max_age_secs);
            }
        }
        jar
    }
}

impl CookieJar for MemoryJar {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .filter(|cookie| !cookie.is_expired())
            .map(|cookie| cookie.value.clone())
    }

    fn set(&mut self, name: &str, value: &str, max_age_secs: u64) {
        self.entries
            .insert(name.to_string(), StoredCookie::new(value, max_age_secs));
    }

    fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
