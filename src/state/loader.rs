// Cache-or-network loading of starred repositories.
// A session is served entirely from the cache or entirely from the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::cache::SnapshotStore;
use crate::error::Result;
use crate::identity::Identity;

use super::engine::{PageFetcher, PaginationEngine, Progress, SessionOutcome};
use super::session::{SessionTicket, SessionTickets};

/// Entry point for starting sessions against one durable store.
pub struct StarredLoader {
    store: Arc<dyn SnapshotStore>,
    engine: PaginationEngine,
    tickets: Mutex<HashMap<Identity, SessionTickets>>,
}

impl StarredLoader {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_engine(store, PaginationEngine::new())
    }

    pub fn with_engine(store: Arc<dyn SnapshotStore>, engine: PaginationEngine) -> Self {
        Self {
            store,
            engine,
            tickets: Mutex::new(HashMap::new()),
        }
    }

    /// Claim the next session for `identity`, abandoning any earlier one.
    pub fn begin(&self, identity: &Identity) -> SessionTicket {
        let mut tickets = self
            .tickets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        tickets.entry(identity.clone()).or_default().issue()
    }

    /// Serve `identity` from the cache, or fetch every page on a miss.
    pub async fn load<F, P>(
        &self,
        ticket: &SessionTicket,
        fetcher: &mut F,
        identity: Identity,
        on_progress: P,
    ) -> SessionOutcome
    where
        F: PageFetcher + ?Sized,
        P: FnMut(Progress) + Send,
    {
        let key = identity.cache_key();
        if let Some(cached) = self.store.read(&key) {
            info!(%key, rows = cached.data.rows.len(), "loaded from cache");
            return SessionOutcome::Cached {
                rows: cached.data.rows,
                cached_at: cached.cached_at,
            };
        }

        info!(%key, "cache miss");
        self.engine
            .run(fetcher, self.store.as_ref(), identity, ticket, on_progress)
            .await
    }

    /// Resolve `location` to an identity and load it. Nothing is fetched or
    /// read if the location carries no identity.
    pub async fn load_location<F, P>(
        &self,
        location: &str,
        fetcher: &mut F,
        on_progress: P,
    ) -> Result<SessionOutcome>
    where
        F: PageFetcher + ?Sized,
        P: FnMut(Progress) + Send,
    {
        let identity = Identity::from_location(location)?;
        let ticket = self.begin(&identity);
        Ok(self.load(&ticket, fetcher, identity, on_progress).await)
    }

    /// Drop the cached snapshot and fetch everything again.
    pub async fn reload<F, P>(
        &self,
        ticket: &SessionTicket,
        fetcher: &mut F,
        identity: Identity,
        on_progress: P,
    ) -> SessionOutcome
    where
        F: PageFetcher + ?Sized,
        P: FnMut(Progress) + Send,
    {
        let key = identity.cache_key();
        match ticket.run_if_current(|| self.store.clear(&key)) {
            None => return SessionOutcome::Abandoned,
            Some(Err(e)) => warn!(%key, error = %e, "failed to clear cached snapshot"),
            Some(Ok(())) => {}
        }

        info!(%key, "reloading");
        self.engine
            .run(fetcher, self.store.as_ref(), identity, ticket, on_progress)
            .await
    }
}
