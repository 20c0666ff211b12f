//! In-memory [`RecordStore`] for tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    RwLock,
};

use async_trait::async_trait;

use super::{RecordStore, StoreError};

/// Map-backed store with Redis `KEYS` glob semantics and failure injection.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    vanished: RwLock<BTreeSet<String>>,
    unavailable: AtomicBool,
    limit_gets: AtomicBool,
    get_limit: AtomicUsize,
    keys_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .unwrap()
            .insert(key.into(), value.into());
    }

    /// Make every subsequent call fail as if the server went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let `successes` fetches through, then fail every later fetch.
    /// Enumeration keeps working.
    pub fn fail_gets_after(&self, successes: usize) {
        self.get_limit.store(successes, Ordering::SeqCst);
        self.limit_gets.store(true, Ordering::SeqCst);
    }

    /// Report `key` from enumeration but return nothing when it is fetched,
    /// like a key deleted between `KEYS` and `GET`.
    pub fn insert_vanished(&self, key: impl Into<String>) {
        self.vanished.write().unwrap().insert(key.into());
    }

    pub fn keys_calls(&self) -> usize {
        self.keys_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        self.keys_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let entries = self.entries.read().unwrap();
        let vanished = self.vanished.read().unwrap();
        let matched: BTreeSet<String> = entries
            .keys()
            .chain(vanished.iter())
            .filter(|key| glob_match(pattern.as_bytes(), key.as_bytes()))
            .cloned()
            .collect();
        Ok(matched.into_iter().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let previous = self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.limit_gets.load(Ordering::SeqCst)
            && previous >= self.get_limit.load(Ordering::SeqCst)
        {
            return Err(StoreError::Unavailable("read timed out".to_string()));
        }
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

/// Redis-style glob match: `*`, `?`, `[abc]`, `[^abc]`, `[a-z]` and `\x`.
pub fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| glob_match(rest, &text[skip..])),
        Some((b'?', rest)) => !text.is_empty() && glob_match(rest, &text[1..]),
        Some((b'[', rest)) => match (text.first(), class_match(rest, text.first().copied())) {
            (Some(_), Some((true, after))) => glob_match(after, &text[1..]),
            _ => false,
        },
        Some((b'\\', rest)) if !rest.is_empty() => {
            text.first() == Some(&rest[0]) && glob_match(&rest[1..], &text[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && glob_match(rest, &text[1..]),
    }
}

/// Match one byte against a `[...]` class body; returns the verdict and the
/// pattern remaining after the closing bracket.
fn class_match(mut pattern: &[u8], byte: Option<u8>) -> Option<(bool, &[u8])> {
    let byte = byte?;
    let negate = pattern.first() == Some(&b'^');
    if negate {
        pattern = &pattern[1..];
    }
    let mut matched = false;
    loop {
        match pattern {
            [] => return None,
            [b']', rest @ ..] => return Some((matched != negate, rest)),
            [b'\\', c, rest @ ..] => {
                matched |= *c == byte;
                pattern = rest;
            }
            [lo, b'-', hi, rest @ ..] if *hi != b']' => {
                let (lo, hi) = if lo <= hi { (*lo, *hi) } else { (*hi, *lo) };
                matched |= (lo..=hi).contains(&byte);
                pattern = rest;
            }
            [c, rest @ ..] => {
                matched |= *c == byte;
                pattern = rest;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        glob_match(pattern.as_bytes(), text.as_bytes())
    }

    #[test]
    fn test_glob_wildcards() {
        assert!(matches("pokemon:fire:*", "pokemon:fire:1"));
        assert!(matches("pokemon:fire:*", "pokemon:fire:"));
        assert!(!matches("pokemon:fire:*", "pokemon:firestorm:1"));
        assert!(matches("h?llo", "hello"));
        assert!(!matches("h?llo", "hllo"));
    }

    #[test]
    fn test_glob_classes() {
        assert!(matches("h[ae]llo", "hallo"));
        assert!(!matches("h[ae]llo", "hillo"));
        assert!(matches("h[^e]llo", "hallo"));
        assert!(!matches("h[^e]llo", "hello"));
        assert!(matches("key[a-c]", "keyb"));
        assert!(!matches("key[a-c]", "keyd"));
        assert!(!matches("key[abc", "keya"));
    }

    #[test]
    fn test_glob_escapes() {
        assert!(matches(r"pokemon:fi\*:*", "pokemon:fi*:1"));
        assert!(!matches(r"pokemon:fi\*:*", "pokemon:fire:1"));
        assert!(matches(r"a\[b", "a[b"));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::with_entries([("pokemon:fire:1", "{}")]);
        store.set_unavailable(true);

        assert!(store.keys("*").await.is_err());
        assert!(store.get("pokemon:fire:1").await.is_err());
        assert!(store.ping().await.is_err());
        assert_eq!(store.keys_calls(), 1);
        assert_eq!(store.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_fail_gets_after_keeps_enumeration_working() {
        let store =
            MemoryStore::with_entries([("pokemon:fire:1", "{}"), ("pokemon:fire:2", "{}")]);
        store.fail_gets_after(1);

        assert_eq!(store.keys("pokemon:fire:*").await.unwrap().len(), 2);
        assert!(store.get("pokemon:fire:1").await.is_ok());
        assert!(store.get("pokemon:fire:2").await.is_err());
    }

    #[tokio::test]
    async fn test_vanished_key_is_listed_but_not_fetched() {
        let store = MemoryStore::with_entries([("pokemon:fire:1", "{}")]);
        store.insert_vanished("pokemon:fire:2");

        let keys = store.keys("pokemon:fire:*").await.unwrap();
        assert_eq!(
            keys,
            vec!["pokemon:fire:1".to_string(), "pokemon:fire:2".to_string()]
        );
        assert_eq!(store.get("pokemon:fire:2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_are_raw_bytes() {
        let store = MemoryStore::with_entries([("pokemon:fire:1", b"\xff\xfe".to_vec())]);

        let value = store.get("pokemon:fire:1").await.unwrap();
        assert_eq!(value, Some(vec![0xff, 0xfe]));
    }
}
