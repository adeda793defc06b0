//! Client-side watch state for BIST tickers
//!
//! [`WatchStore`] owns three symbol collections:
//!
//! - favorites, toggled on and off, persisted under the `favorites` key
//! - the watchlist, persisted under the `watchlist` key
//! - the compare pair, at most two symbols, kept in memory only
//!
//! Persistence goes through the [`KeyValueStorage`] trait so the same store runs
//! over a directory of JSON files ([`FileStorage`]) or a shared in-memory map
//! ([`MemoryStorage`]). Mutations never fail: invalid input is a silent no-op and
//! storage problems are logged.
//!
//! # Example
//!
//! ```rust
//! use borsa_store::{MemoryStorage, WatchStore};
//!
//! let mut store = WatchStore::open(Box::new(MemoryStorage::new()));
//! store.toggle_favorite("thyao");
//! assert!(store.is_favorite("THYAO"));
//!
//! store.add_to_compare("GARAN");
//! store.add_to_compare("AKBNK");
//! store.add_to_compare("ASELS"); // pair is full, ignored
//! assert_eq!(store.compare(), ["GARAN", "AKBNK"]);
//! ```

pub mod error;
pub mod event;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use event::{StoreEvent, SubscriptionId};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{COMPARE_CAPACITY, FAVORITES_KEY, WATCHLIST_KEY, WatchStore};
