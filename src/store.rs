//! Commit interface to the host's icon storage.

use crate::error::Result;
use crate::types::{FetchedIcon, IconId, ItemId};
use std::collections::HashMap;

/// Destination for downloaded icons.
///
/// A batch touches its store exactly once when it finalizes: one
/// [`add_icons`](IconStore::add_icons) call carrying every successful fetch,
/// followed by [`mark_needs_refresh`](IconStore::mark_needs_refresh).
#[async_trait::async_trait]
pub trait IconStore: Send + Sync {
    /// Append the icons and attach each one to its item
    async fn add_icons(&self, icons: Vec<FetchedIcon>) -> Result<()>;

    /// Signal that icon displays should be refreshed
    async fn mark_needs_refresh(&self);
}

#[derive(Debug, Default)]
struct StoredIcons {
    icons: HashMap<IconId, Vec<u8>>,
    assignments: HashMap<ItemId, IconId>,
    commits: usize,
    needs_refresh: bool,
}

/// In-memory [`IconStore`] for embedding hosts and tests
#[derive(Debug, Default)]
pub struct MemoryIconStore {
    inner: tokio::sync::Mutex<StoredIcons>,
}

impl MemoryIconStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Icon bytes by identifier
    pub async fn icon(&self, id: IconId) -> Option<Vec<u8>> {
        self.inner.lock().await.icons.get(&id).cloned()
    }

    /// Icon currently assigned to an item
    pub async fn icon_for(&self, item: ItemId) -> Option<IconId> {
        self.inner.lock().await.assignments.get(&item).copied()
    }

    /// Number of stored icons
    pub async fn len(&self) -> usize {
        self.inner.lock().await.icons.len()
    }

    /// Whether the store holds no icons
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.icons.is_empty()
    }

    /// Number of `add_icons` calls received
    pub async fn commit_count(&self) -> usize {
        self.inner.lock().await.commits
    }

    /// Whether a refresh was requested since the last [`take_refresh`](Self::take_refresh)
    pub async fn needs_refresh(&self) -> bool {
        self.inner.lock().await.needs_refresh
    }

    /// Read and clear the refresh flag
    pub async fn take_refresh(&self) -> bool {
        std::mem::take(&mut self.inner.lock().await.needs_refresh)
    }
}

#[async_trait::async_trait]
impl IconStore for MemoryIconStore {
    async fn add_icons(&self, icons: Vec<FetchedIcon>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.commits += 1;
        inner.icons.reserve(icons.len());
        for icon in icons {
            // A later fetch for the same item replaces its assignment; the old icon stays
            inner.assignments.insert(icon.item.id, icon.icon_id);
            inner.icons.insert(icon.icon_id, icon.data);
        }
        Ok(())
    }

    async fn mark_needs_refresh(&self) {
        self.inner.lock().await.needs_refresh = true;
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkItem;

    fn icon(item: u64, id: u128, data: &[u8]) -> FetchedIcon {
        FetchedIcon {
            item: WorkItem::new(item, "https://example.com/"),
            icon_id: IconId(id),
            data: data.to_vec(),
        }
    }

    #[tokio::test]
    async fn add_icons_stores_data_and_assignments() {
        let store = MemoryIconStore::new();
        assert!(store.is_empty().await);

        store
            .add_icons(vec![icon(1, 10, b"a"), icon(2, 20, b"b")])
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.commit_count().await, 1);
        assert_eq!(store.icon_for(ItemId(1)).await, Some(IconId(10)));
        assert_eq!(store.icon(IconId(20)).await.as_deref(), Some(&b"b"[..]));
        assert_eq!(store.icon_for(ItemId(3)).await, None);
    }

    #[tokio::test]
    async fn reassigning_an_item_keeps_previous_icon() {
        let store = MemoryIconStore::new();
        store.add_icons(vec![icon(1, 10, b"old")]).await.unwrap();
        store.add_icons(vec![icon(1, 11, b"new")]).await.unwrap();

        assert_eq!(store.icon_for(ItemId(1)).await, Some(IconId(11)));
        assert_eq!(store.len().await, 2);
        assert_eq!(store.commit_count().await, 2);
    }

    #[tokio::test]
    async fn refresh_flag_is_taken_once() {
        let store = MemoryIconStore::new();
        assert!(!store.needs_refresh().await);

        store.mark_needs_refresh().await;
        assert!(store.needs_refresh().await);
        assert!(store.take_refresh().await);
        assert!(!store.take_refresh().await);
    }
}
