//! Favorites, watchlist and compare-pair state

use crate::error::Result;
use crate::event::{Observer, StoreEvent, SubscriptionId};
use crate::storage::KeyValueStorage;
use borsa_utils::normalize_symbol;
use tracing::{debug, warn};

/// Storage key of the favorites array
pub const FAVORITES_KEY: &str = "favorites";

/// Storage key of the watchlist array
pub const WATCHLIST_KEY: &str = "watchlist";

/// Maximum number of symbols in the compare pair
pub const COMPARE_CAPACITY: usize = 2;

/// Which persisted collection a commit must write
#[derive(Debug, Clone, Copy)]
enum Collection {
    Favorites,
    Watchlist,
    Compare,
}

impl Collection {
    fn of(event: &StoreEvent) -> Self {
        match event {
            StoreEvent::FavoriteAdded(_) | StoreEvent::FavoriteRemoved(_) => Self::Favorites,
            StoreEvent::WatchlistAdded(_) | StoreEvent::WatchlistRemoved(_) => Self::Watchlist,
            StoreEvent::CompareAdded(_)
            | StoreEvent::CompareRemoved(_)
            | StoreEvent::CompareCleared => Self::Compare,
        }
    }
}

/// Symbol state consumed by presentation code
///
/// Favorites and watchlist are loaded once in [`WatchStore::open`] and written
/// back after every effective mutation. The compare pair lives only as long as
/// the store value. All symbols are trimmed and upper-cased before use.
///
/// Mutations are total: blank symbols, duplicate adds, a full compare pair and
/// removals of absent symbols do nothing and report nothing.
pub struct WatchStore {
    storage: Box<dyn KeyValueStorage>,
    favorites: Vec<String>,
    watchlist: Vec<String>,
    compare: Vec<String>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl WatchStore {
    /// Load persisted state from `storage` and return the store handle
    ///
    /// Absent, unreadable or malformed entries fall back to empty sets.
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let favorites = load_symbols(storage.as_ref(), FAVORITES_KEY);
        let watchlist = load_symbols(storage.as_ref(), WATCHLIST_KEY);
        debug!(
            favorites = favorites.len(),
            watchlist = watchlist.len(),
            "Opened watch store"
        );

        Self {
            storage,
            favorites,
            watchlist,
            compare: Vec::with_capacity(COMPARE_CAPACITY),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ---- favorites -------------------------------------------------------

    /// Add `symbol` to favorites, or remove it if already there
    pub fn toggle_favorite(&mut self, symbol: &str) {
        let Some(symbol) = normalize_symbol(symbol) else {
            return;
        };

        let event = if let Some(pos) = self.favorites.iter().position(|s| *s == symbol) {
            self.favorites.remove(pos);
            StoreEvent::FavoriteRemoved(symbol)
        } else {
            self.favorites.push(symbol.clone());
            StoreEvent::FavoriteAdded(symbol)
        };
        self.commit(event);
    }

    pub fn is_favorite(&self, symbol: &str) -> bool {
        contains(&self.favorites, symbol)
    }

    /// Favorite symbols in insertion order
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    // ---- watchlist -------------------------------------------------------

    /// Add `symbol` to the watchlist unless blank or already present
    pub fn add_to_watchlist(&mut self, symbol: &str) {
        let Some(symbol) = normalize_symbol(symbol) else {
            return;
        };
        if self.watchlist.contains(&symbol) {
            return;
        }
        self.watchlist.push(symbol.clone());
        self.commit(StoreEvent::WatchlistAdded(symbol));
    }

    pub fn remove_from_watchlist(&mut self, symbol: &str) {
        let Some(symbol) = normalize_symbol(symbol) else {
            return;
        };
        if let Some(pos) = self.watchlist.iter().position(|s| *s == symbol) {
            self.watchlist.remove(pos);
            self.commit(StoreEvent::WatchlistRemoved(symbol));
        }
    }

    pub fn is_in_watchlist(&self, symbol: &str) -> bool {
        contains(&self.watchlist, symbol)
    }

    /// Watchlist symbols in insertion order
    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    // ---- compare pair ----------------------------------------------------

    /// Append `symbol` to the compare pair
    ///
    /// Ignored when the pair already holds [`COMPARE_CAPACITY`] symbols or
    /// already contains `symbol`.
    pub fn add_to_compare(&mut self, symbol: &str) {
        let Some(symbol) = normalize_symbol(symbol) else {
            return;
        };
        if self.compare.len() >= COMPARE_CAPACITY || self.compare.contains(&symbol) {
            return;
        }
        self.compare.push(symbol.clone());
        self.commit(StoreEvent::CompareAdded(symbol));
    }

    pub fn remove_from_compare(&mut self, symbol: &str) {
        let Some(symbol) = normalize_symbol(symbol) else {
            return;
        };
        if let Some(pos) = self.compare.iter().position(|s| *s == symbol) {
            self.compare.remove(pos);
            self.commit(StoreEvent::CompareRemoved(symbol));
        }
    }

    pub fn clear_compare(&mut self) {
        if self.compare.is_empty() {
            return;
        }
        self.compare.clear();
        self.commit(StoreEvent::CompareCleared);
    }

    pub fn is_in_compare(&self, symbol: &str) -> bool {
        contains(&self.compare, symbol)
    }

    /// Compare pair in selection order
    pub fn compare(&self) -> &[String] {
        &self.compare
    }

    /// Whether the compare pair is full
    pub fn is_compare_full(&self) -> bool {
        self.compare.len() >= COMPARE_CAPACITY
    }

    // ---- observers -------------------------------------------------------

    /// Register `observer`, called after every committed change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a subscription, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    // ---- persistence -----------------------------------------------------

    /// Write favorites and watchlist to storage
    ///
    /// Mutations already persist on their own; this is for callers that want
    /// the storage error instead of a log line.
    pub fn persist(&mut self) -> Result<()> {
        write_symbols(self.storage.as_mut(), FAVORITES_KEY, &self.favorites)?;
        write_symbols(self.storage.as_mut(), WATCHLIST_KEY, &self.watchlist)
    }

    /// Persist the collection touched by `event`, then notify observers
    fn commit(&mut self, event: StoreEvent) {
        let written = match Collection::of(&event) {
            Collection::Favorites => {
                Some(write_symbols(self.storage.as_mut(), FAVORITES_KEY, &self.favorites))
            }
            Collection::Watchlist => {
                Some(write_symbols(self.storage.as_mut(), WATCHLIST_KEY, &self.watchlist))
            }
            Collection::Compare => None,
        };
        if let Some(Err(e)) = written {
            warn!(?event, error = %e, "Failed to persist store change; keeping it in memory");
        }

        debug!(?event, "Committed store change");
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }
}

fn contains(set: &[String], symbol: &str) -> bool {
    normalize_symbol(symbol).is_some_and(|s| set.contains(&s))
}

fn load_symbols(storage: &dyn KeyValueStorage, key: &str) -> Vec<String> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Could not read persisted symbols; starting empty");
            return Vec::new();
        }
    };

    let parsed: Vec<String> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(key, error = %e, "Malformed persisted symbols; starting empty");
            return Vec::new();
        }
    };

    let mut symbols: Vec<String> = Vec::with_capacity(parsed.len());
    for symbol in parsed.iter().filter_map(|s| normalize_symbol(s)) {
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

fn write_symbols(storage: &mut dyn KeyValueStorage, key: &str, symbols: &[String]) -> Result<()> {
    let json = serde_json::to_string(symbols)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::{FileStorage, MemoryStorage};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    fn store_over(storage: &MemoryStorage) -> WatchStore {
        WatchStore::open(Box::new(storage.clone()))
    }

    fn as_set(symbols: &[String]) -> HashSet<String> {
        symbols.iter().cloned().collect()
    }

    /// Accepts reads, rejects every write
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::IoError(std::io::Error::other("read-only")))
        }

        fn remove(&mut self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_toggle_favorite_twice_restores_state() {
        let storage = MemoryStorage::new();
        let mut store = store_over(&storage);
        store.toggle_favorite("GARAN");
        let before = store.favorites().to_vec();

        store.toggle_favorite("THYAO");
        assert!(store.is_favorite("THYAO"));
        store.toggle_favorite("THYAO");

        assert_eq!(store.favorites(), before.as_slice());
        assert!(!store.is_favorite("THYAO"));
    }

    #[test]
    fn test_favorites_are_case_insensitive() {
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
        store.toggle_favorite("garan");
        assert!(store.is_favorite("GARAN"));
        assert!(store.is_favorite(" Garan "));

        store.toggle_favorite("GARAN");
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_blank_symbols_are_ignored() {
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
        store.toggle_favorite("  ");
        store.add_to_watchlist("");
        store.add_to_watchlist("\t");
        store.add_to_compare(" ");

        assert!(store.favorites().is_empty());
        assert!(store.watchlist().is_empty());
        assert!(store.compare().is_empty());
        assert!(!store.is_favorite(""));
    }

    #[test]
    fn test_watchlist_add_is_idempotent() {
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
        store.add_to_watchlist("asels");
        store.add_to_watchlist("ASELS");
        assert_eq!(store.watchlist(), ["ASELS"]);
        assert!(store.is_in_watchlist("asels"));
    }

    #[test]
    fn test_remove_absent_from_empty_watchlist_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = store_over(&storage);
        store.remove_from_watchlist("NOTPRESENT");

        assert!(store.watchlist().is_empty());
        // Nothing was committed, so nothing was written
        assert_eq!(storage.get(WATCHLIST_KEY).unwrap(), None);
    }

    #[test]
    fn test_compare_pair_holds_two() {
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
        store.add_to_compare("THYAO");
        store.add_to_compare("PGSUS");
        assert!(store.is_in_compare("THYAO"));
        assert!(store.is_in_compare("PGSUS"));
        assert!(store.is_compare_full());

        store.add_to_compare("TAVHL");
        assert_eq!(store.compare(), ["THYAO", "PGSUS"]);
        assert!(!store.is_in_compare("TAVHL"));
    }

    #[test]
    fn test_compare_rejects_duplicates() {
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
        store.add_to_compare("KCHOL");
        store.add_to_compare("kchol");
        assert_eq!(store.compare().len(), 1);
    }

    #[test]
    fn test_compare_remove_and_clear() {
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
        store.add_to_compare("BIMAS");
        store.add_to_compare("MGROS");

        store.remove_from_compare("bimas");
        assert_eq!(store.compare(), ["MGROS"]);

        store.add_to_compare("SOKM");
        store.clear_compare();
        assert!(store.compare().is_empty());
    }

    #[test]
    fn test_compare_pair_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut store = store_over(&storage);
        store.add_to_compare("EREGL");
        store.add_to_compare("KRDMD");

        let reopened = store_over(&storage);
        assert!(reopened.compare().is_empty());
    }

    #[test]
    fn test_commit_writes_only_the_touched_collection() {
        let storage = MemoryStorage::new();
        let mut store = store_over(&storage);

        store.add_to_compare("EREGL");
        store.remove_from_compare("EREGL");
        store.add_to_compare("KRDMD");
        store.clear_compare();
        assert_eq!(storage.get(FAVORITES_KEY).unwrap(), None);
        assert_eq!(storage.get(WATCHLIST_KEY).unwrap(), None);

        store.toggle_favorite("KRDMD");
        assert_eq!(
            storage.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["KRDMD"]"#)
        );
        assert_eq!(storage.get(WATCHLIST_KEY).unwrap(), None);

        store.add_to_watchlist("EREGL");
        assert_eq!(
            storage.get(WATCHLIST_KEY).unwrap().as_deref(),
            Some(r#"["EREGL"]"#)
        );
    }

    #[test]
    fn test_persisted_sets_survive_reload() {
        let mut storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, r#"["THYAO","GARAN"]"#).unwrap();

        let mut store = store_over(&storage);
        assert_eq!(
            as_set(store.favorites()),
            as_set(&["GARAN".to_string(), "THYAO".to_string()])
        );

        store.add_to_watchlist("tuprs");
        store.toggle_favorite("SISE");

        let reopened = store_over(&storage);
        assert_eq!(reopened.watchlist(), ["TUPRS"]);
        assert_eq!(as_set(reopened.favorites()), as_set(store.favorites()));
    }

    #[test]
    fn test_mutations_write_json_arrays() {
        let storage = MemoryStorage::new();
        let mut store = store_over(&storage);
        store.add_to_watchlist("THYAO");
        store.add_to_watchlist("GARAN");

        let raw = storage.get(WATCHLIST_KEY).unwrap().unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, ["THYAO", "GARAN"]);
    }

    #[test]
    fn test_malformed_persisted_data_yields_empty_sets() {
        let mut storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, "not json at all").unwrap();
        storage.set(WATCHLIST_KEY, r#"{"THYAO": true}"#).unwrap();

        let store = store_over(&storage);
        assert!(store.favorites().is_empty());
        assert!(store.watchlist().is_empty());
    }

    #[test]
    fn test_loaded_entries_are_normalized_and_deduplicated() {
        let mut storage = MemoryStorage::new();
        storage
            .set(WATCHLIST_KEY, r#"["garan", "GARAN", " ", "akbnk"]"#)
            .unwrap();

        let store = store_over(&storage);
        assert_eq!(store.watchlist(), ["GARAN", "AKBNK"]);
    }

    #[test]
    fn test_file_backed_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::new(dir.path()).unwrap();
            let mut store = WatchStore::open(Box::new(storage));
            store.toggle_favorite("ASELS");
            store.add_to_watchlist("TCELL");
        }

        let storage = FileStorage::new(dir.path()).unwrap();
        let store = WatchStore::open(Box::new(storage));
        assert!(store.is_favorite("ASELS"));
        assert!(store.is_in_watchlist("TCELL"));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = WatchStore::open(Box::new(ReadOnlyStorage));
        store.toggle_favorite("TTKOM");
        assert!(store.is_favorite("TTKOM"));
        assert!(store.persist().is_err());
    }

    #[test]
    fn test_observers_receive_committed_changes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));

        let sink = Arc::clone(&seen);
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        store.toggle_favorite("FROTO");
        store.toggle_favorite("FROTO");
        store.add_to_watchlist("FROTO");
        store.add_to_watchlist("FROTO"); // no-op, no event
        store.add_to_compare("FROTO");
        store.clear_compare();
        store.clear_compare(); // already empty, no event

        let events = seen.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                StoreEvent::FavoriteAdded("FROTO".into()),
                StoreEvent::FavoriteRemoved("FROTO".into()),
                StoreEvent::WatchlistAdded("FROTO".into()),
                StoreEvent::CompareAdded("FROTO".into()),
                StoreEvent::CompareCleared,
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Arc::new(Mutex::new(0_usize));
        let mut store = WatchStore::open(Box::new(MemoryStorage::new()));

        let counter = Arc::clone(&count);
        let id = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.toggle_favorite("DOAS");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle_favorite("DOAS");

        assert_eq!(*count.lock().unwrap(), 1);
    }
}
