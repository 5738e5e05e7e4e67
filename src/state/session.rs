// Fetch session state machine.
// Each transition consumes the session and returns its successor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{GitmarksError, Result};
use crate::github::StarredRepository;
use crate::identity::{CacheKey, Identity};

use super::row::Row;

/// Where a fetch session is in its page loop.
#[derive(Debug)]
pub enum SessionState {
    Idle,
    Fetching { page: u32 },
    Accumulating { page: u32, received: usize },
    Completed,
    Failed(GitmarksError),
}

/// One run of the page loop for one identity.
#[derive(Debug)]
pub struct FetchSession {
    identity: Identity,
    key: CacheKey,
    page_size: u32,
    rows: Vec<Row>,
    state: SessionState,
}

impl FetchSession {
    pub fn new(identity: Identity, page_size: u32) -> Self {
        let key = identity.cache_key();
        Self {
            identity,
            key,
            page_size,
            rows: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn cache_key(&self) -> &CacheKey {
        &self.key
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<Row>, SessionState) {
        (self.rows, self.state)
    }

    /// Idle -> Fetching(1).
    pub fn start(self) -> Self {
        match self.state {
            SessionState::Idle => Self {
                state: SessionState::Fetching { page: 1 },
                ..self
            },
            _ => self,
        }
    }

    /// Fetching(n) -> Accumulating | Failed, given the outcome of fetching page n.
    pub fn on_page(self, outcome: Result<Vec<StarredRepository>>) -> Self {
        let SessionState::Fetching { page } = self.state else {
            return self;
        };

        match outcome {
            Ok(records) => {
                let received = records.len();
                let mut rows = self.rows;
                rows.extend(records.into_iter().map(Row::from));
                Self {
                    rows,
                    state: SessionState::Accumulating { page, received },
                    ..self
                }
            }
            Err(err) => Self {
                state: SessionState::Failed(err),
                ..self
            },
        }
    }

    /// Accumulating -> Fetching(n+1) | Completed.
    ///
    /// A short page is the only end-of-data signal; a full page always
    /// asks for one more.
    pub fn advance(self) -> Self {
        let SessionState::Accumulating { page, received } = self.state else {
            return self;
        };

        let state = if received < self.page_size as usize {
            SessionState::Completed
        } else {
            SessionState::Fetching { page: page + 1 }
        };
        Self { state, ..self }
    }
}

/// Issues tickets for sessions of one identity. Only the latest ticket is current.
#[derive(Debug, Clone, Default)]
pub struct SessionTickets {
    generation: Arc<AtomicU64>,
    /// Held while a new generation starts and while guarded work runs.
    gate: Arc<Mutex<()>>,
}

impl SessionTickets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, abandoning every earlier ticket.
    ///
    /// Waits for guarded work of the previous generation to finish.
    pub fn issue(&self) -> SessionTicket {
        let _gate = lock(&self.gate);
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SessionTicket {
            id,
            generation: Arc::clone(&self.generation),
            gate: Arc::clone(&self.gate),
        }
    }
}

/// Proof that a session was started; goes stale once a newer one is issued.
#[derive(Debug, Clone)]
pub struct SessionTicket {
    id: u64,
    generation: Arc<AtomicU64>,
    gate: Arc<Mutex<()>>,
}

impl SessionTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.id
    }

    /// Run `f` only if this ticket is current. No newer ticket can be issued
    /// until `f` returns.
    pub fn run_if_current<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let _gate = lock(&self.gate);
        self.is_current().then(f)
    }
}

fn lock(gate: &Mutex<()>) -> MutexGuard<'_, ()> {
    gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
