//! Change notifications emitted by the store

use serde::{Deserialize, Serialize};

/// A committed change to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "symbol", rename_all = "snake_case")]
pub enum StoreEvent {
    FavoriteAdded(String),
    FavoriteRemoved(String),
    WatchlistAdded(String),
    WatchlistRemoved(String),
    CompareAdded(String),
    CompareRemoved(String),
    CompareCleared,
}

impl StoreEvent {
    /// Symbol affected by the change, if any
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::FavoriteAdded(s)
            | Self::FavoriteRemoved(s)
            | Self::WatchlistAdded(s)
            | Self::WatchlistRemoved(s)
            | Self::CompareAdded(s)
            | Self::CompareRemoved(s) => Some(s),
            Self::CompareCleared => None,
        }
    }
}

/// Handle returned by [`WatchStore::subscribe`](crate::WatchStore::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Observer = Box<dyn Fn(&StoreEvent) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_symbol() {
        assert_eq!(
            StoreEvent::FavoriteAdded("THYAO".into()).symbol(),
            Some("THYAO")
        );
        assert_eq!(StoreEvent::CompareCleared.symbol(), None);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(StoreEvent::FavoriteAdded("SISE".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "favorite_added", "symbol": "SISE"})
        );
    }
}
