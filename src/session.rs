//! Session-scoped loop cache
//!
//! Looped buffers produced during an interactive session are kept in an
//! explicit in-memory store keyed by a generated name, so a later
//! composition can pick one up without re-rendering. The store lives only
//! as long as the session; nothing here survives a restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::audio::buffer::AudioBuffer;

/// One cached buffer plus when it was stored
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub buffer: AudioBuffer,
    pub created_at: DateTime<Utc>,
}

/// In-memory key-value store for session-lifetime buffers
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: HashMap<String, SessionEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a buffer under `name`, replacing any previous entry
    pub fn put(&mut self, name: impl Into<String>, buffer: AudioBuffer) {
        self.entries.insert(
            name.into(),
            SessionEntry {
                buffer,
                created_at: Utc::now(),
            },
        );
    }

    /// Look up a buffer by name
    pub fn get(&self, name: &str) -> Option<&AudioBuffer> {
        self.entries.get(name).map(|e| &e.buffer)
    }

    /// Look up a full entry, including its timestamp
    pub fn entry(&self, name: &str) -> Option<&SessionEntry> {
        self.entries.get(name)
    }

    /// Names of all stored buffers, sorted for stable display
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate a unique store key for a looped file
    pub fn generated_name(stem: &str) -> String {
        format!("Looped_{}_{}", stem, Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::buffer::ChannelLayout;

    fn short_buffer() -> AudioBuffer {
        AudioBuffer::silent(100, ChannelLayout::Mono)
    }

    #[test]
    fn test_put_and_get() {
        let mut store = SessionStore::new();
        assert!(store.is_empty());

        store.put("Looped_ambient", short_buffer());
        assert_eq!(store.len(), 1);
        assert!(store.get("Looped_ambient").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_put_replaces() {
        let mut store = SessionStore::new();
        store.put("a", short_buffer());
        store.put("a", AudioBuffer::silent(200, ChannelLayout::Mono));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().len(), 200);
    }

    #[test]
    fn test_names_sorted() {
        let mut store = SessionStore::new();
        store.put("b", short_buffer());
        store.put("a", short_buffer());

        assert_eq!(store.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_entry_has_timestamp() {
        let mut store = SessionStore::new();
        store.put("a", short_buffer());

        let entry = store.entry("a").unwrap();
        assert!(entry.created_at <= Utc::now());
    }

    #[test]
    fn test_generated_names_are_unique() {
        let a = SessionStore::generated_name("rain");
        let b = SessionStore::generated_name("rain");

        assert!(a.starts_with("Looped_rain_"));
        assert_ne!(a, b);
    }
}
