// Test doubles shared by the engine and loader tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::cache::{CachedData, MemoryStore, Snapshot, SnapshotStore};
use crate::error::{GitmarksError, Result};
use crate::github::{Owner, StarredRepository};
use crate::identity::{CacheKey, Identity};

use super::engine::PageFetcher;
use super::session::SessionTickets;

pub(crate) fn records(page: u32, count: usize) -> Vec<StarredRepository> {
    (0..count)
        .map(|i| StarredRepository {
            name: format!("p{}-{}", page, i),
            owner: Owner {
                login: "someone".to_string(),
            },
            description: None,
            language: Some("Rust".to_string()),
            stargazers_count: i as u64,
        })
        .collect()
}

/// Replays canned page results and records which pages were asked for.
pub(crate) struct ScriptedFetcher {
    pages: VecDeque<Result<Vec<StarredRepository>>>,
    pub(crate) requested: Vec<u32>,
    /// Issues a newer ticket when this page is requested.
    pub(crate) supersede_on: Option<(u32, SessionTickets)>,
}

impl ScriptedFetcher {
    pub(crate) fn new(pages: Vec<Result<Vec<StarredRepository>>>) -> Self {
        Self {
            pages: pages.into(),
            requested: Vec::new(),
            supersede_on: None,
        }
    }

    pub(crate) fn sized(sizes: &[usize]) -> Self {
        Self::new(
            sizes
                .iter()
                .enumerate()
                .map(|(i, n)| Ok(records(i as u32 + 1, *n)))
                .collect(),
        )
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(
        &mut self,
        _identity: &Identity,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<StarredRepository>> {
        self.requested.push(page);
        if let Some((at, tickets)) = &self.supersede_on {
            if *at == page {
                tickets.issue();
            }
        }
        self.pages
            .pop_front()
            .unwrap_or_else(|| Err(GitmarksError::Transport("script exhausted".into())))
    }
}

/// Memory store that counts writes, optionally failing them.
#[derive(Default)]
pub(crate) struct CountingStore {
    pub(crate) inner: MemoryStore,
    pub(crate) writes: AtomicUsize,
    pub(crate) fail_writes: bool,
}

impl SnapshotStore for CountingStore {
    fn read(&self, key: &CacheKey) -> Option<CachedData<Snapshot>> {
        self.inner.read(key)
    }

    fn write(&self, key: &CacheKey, snapshot: &Snapshot) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(GitmarksError::CacheWrite("quota exceeded".into()));
        }
        self.inner.write(key, snapshot)
    }

    fn clear(&self, key: &CacheKey) -> Result<()> {
        self.inner.clear(key)
    }
}
