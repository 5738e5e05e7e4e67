// Pagination engine.
// Drives a fetch session page by page and persists the result on completion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cache::{Snapshot, SnapshotStore};
use crate::error::{GitmarksError, Result};
use crate::github::{MAX_PER_PAGE, StarredRepository};
use crate::identity::Identity;

use super::row::Row;
use super::session::{FetchSession, SessionState, SessionTicket};

/// Source of starred-repository pages.
#[async_trait]
pub trait PageFetcher: Send {
    /// Fetch page `page` (1-based). An empty page means there is no more data.
    async fn fetch_page(
        &mut self,
        identity: &Identity,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StarredRepository>>;
}

/// Progress report emitted after each page is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub page: u32,
    pub received: usize,
    pub total: usize,
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Served from the durable cache without touching the network.
    Cached {
        rows: Vec<Row>,
        cached_at: Option<DateTime<Utc>>,
    },
    /// Every page was fetched. `cache_error` is set if persisting failed.
    Completed {
        rows: Vec<Row>,
        cache_error: Option<GitmarksError>,
    },
    /// A page failed; nothing was persisted.
    Failed {
        error: GitmarksError,
        partial: Vec<Row>,
    },
    /// A newer session for the same identity took over.
    Abandoned,
}

impl SessionOutcome {
    pub fn rows(&self) -> &[Row] {
        match self {
            SessionOutcome::Cached { rows, .. } | SessionOutcome::Completed { rows, .. } => rows,
            SessionOutcome::Failed { .. } | SessionOutcome::Abandoned => &[],
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, SessionOutcome::Cached { .. })
    }
}

/// Sequential page loop over a [`PageFetcher`].
#[derive(Debug, Clone, Copy)]
pub struct PaginationEngine {
    page_size: u32,
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self {
            page_size: MAX_PER_PAGE,
        }
    }
}

impl PaginationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Run a fresh session for `identity` to a terminal state.
    ///
    /// Pages are requested one at a time. The ticket is checked before every
    /// step, and the cache write happens only while it is still current.
    pub async fn run<F, P>(
        &self,
        fetcher: &mut F,
        store: &dyn SnapshotStore,
        identity: Identity,
        ticket: &SessionTicket,
        mut on_progress: P,
    ) -> SessionOutcome
    where
        F: PageFetcher + ?Sized,
        P: FnMut(Progress) + Send,
    {
        info!(%identity, page_size = self.page_size, "starting fetch session");
        let mut session = FetchSession::new(identity, self.page_size);

        loop {
            if !ticket.is_current() {
                info!(identity = %session.identity(), "fetch session abandoned");
                return SessionOutcome::Abandoned;
            }

            match session.state() {
                SessionState::Idle => session = session.start(),
                SessionState::Fetching { page } => {
                    let page = *page;
                    debug!(identity = %session.identity(), page, "fetching page");
                    let outcome = fetcher
                        .fetch_page(session.identity(), page, self.page_size)
                        .await;
                    session = session.on_page(outcome);
                }
                SessionState::Accumulating { page, received } => {
                    let progress = Progress {
                        page: *page,
                        received: *received,
                        total: session.rows().len(),
                    };
                    debug!(page = progress.page, received = progress.received, "page received");
                    on_progress(progress);
                    session = session.advance();
                }
                SessionState::Completed | SessionState::Failed(_) => {
                    return Self::settle(session, store, ticket);
                }
            }
        }
    }

    /// Turn a terminal session into its outcome, persisting completed ones.
    fn settle(
        session: FetchSession,
        store: &dyn SnapshotStore,
        ticket: &SessionTicket,
    ) -> SessionOutcome {
        let key = session.cache_key().clone();
        let (rows, state) = session.into_parts();

        if let SessionState::Failed(error) = state {
            warn!(%key, rows = rows.len(), kind = ?error.kind(), %error, "fetch session failed");
            return SessionOutcome::Failed {
                error,
                partial: rows,
            };
        }

        let snapshot = Snapshot::new(rows);
        let Some(written) = ticket.run_if_current(|| store.write(&key, &snapshot)) else {
            info!(%key, "fetch session abandoned before caching");
            return SessionOutcome::Abandoned;
        };

        let cache_error = match written {
            Ok(()) => {
                info!(%key, rows = snapshot.rows.len(), "cached starred repositories");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "failed to cache starred repositories");
                Some(e)
            }
        };

        SessionOutcome::Completed {
            rows: snapshot.rows,
            cache_error,
        }
    }
}
