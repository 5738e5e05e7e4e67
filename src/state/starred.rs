// Starred list view state.
// Tracks the current session's result, the language filter, and list selection.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

use super::engine::{Progress, SessionOutcome};
use super::filter::{self, LanguageFilter};
use super::row::Row;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Rows of a finished session.
#[derive(Debug, Clone, Default)]
pub struct StarredList {
    pub rows: Vec<Row>,
    /// Served from the durable cache.
    pub cached: bool,
    pub cached_at: Option<DateTime<Utc>>,
    /// Persisting failed; the rows are still usable.
    pub cache_warning: Option<String>,
}

/// State behind the starred repositories screen.
#[derive(Debug, Default)]
pub struct StarredState {
    pub data: LoadingState<StarredList>,
    pub filter: LanguageFilter,
    pub list_state: ListState,
    /// Latest page report of the running session.
    pub progress: Option<Progress>,
    /// Session whose messages are applied; anything else is stale.
    session_id: Option<u64>,
}

impl StarredState {
    pub fn new(filter: LanguageFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Enter the loading state for session `session_id`, dropping earlier rows.
    pub fn set_loading(&mut self, session_id: u64) {
        self.session_id = Some(session_id);
        self.data = LoadingState::Loading;
        self.progress = None;
        self.list_state.select(None);
    }

    fn is_current(&self, session_id: u64) -> bool {
        self.session_id == Some(session_id)
    }

    /// Record progress of `session_id`. Returns false for stale sessions.
    pub fn apply_progress(&mut self, session_id: u64, progress: Progress) -> bool {
        if !self.is_current(session_id) {
            return false;
        }
        self.progress = Some(progress);
        true
    }

    /// Apply the outcome of `session_id`. Returns false for stale sessions.
    ///
    /// Failed sessions show their error only; partial rows are dropped.
    pub fn apply_outcome(&mut self, session_id: u64, outcome: SessionOutcome) -> bool {
        if !self.is_current(session_id) {
            return false;
        }
        self.progress = None;

        self.data = match outcome {
            SessionOutcome::Cached { rows, cached_at } => LoadingState::Loaded(StarredList {
                rows,
                cached: true,
                cached_at,
                cache_warning: None,
            }),
            SessionOutcome::Completed { rows, cache_error } => LoadingState::Loaded(StarredList {
                rows,
                cached: false,
                cached_at: None,
                cache_warning: cache_error.map(|e| e.to_string()),
            }),
            SessionOutcome::Failed { error, .. } => LoadingState::Error(error.to_string()),
            SessionOutcome::Abandoned => return false,
        };
        self.reset_selection();
        true
    }

    /// Rows passing the current language filter, in original order.
    pub fn visible_rows(&self) -> Vec<&Row> {
        match self.data.data() {
            Some(list) => self.filter.apply(&list.rows),
            None => Vec::new(),
        }
    }

    /// Languages to offer in the filter, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.data
            .data()
            .map(|list| filter::languages(&list.rows))
            .unwrap_or_default()
    }

    /// Step the language filter forward or backward.
    pub fn cycle_filter(&mut self, forward: bool) {
        self.filter = self.filter.cycle(&self.languages(), forward);
        self.reset_selection();
    }

    pub fn set_filter(&mut self, filter: LanguageFilter) {
        self.filter = filter;
        self.reset_selection();
    }

    /// Get the selected row.
    pub fn selected_row(&self) -> Option<&Row> {
        let index = self.list_state.selected()?;
        self.visible_rows().get(index).copied()
    }

    /// Select the next row in the list.
    pub fn select_next(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous row in the list.
    pub fn select_prev(&mut self) {
        if self.visible_rows().is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    /// Reset selection to first row.
    pub fn reset_selection(&mut self) {
        if self.visible_rows().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}
