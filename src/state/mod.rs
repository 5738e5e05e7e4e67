// State management module.
// Holds the fetch session machinery and the starred list view state.

pub mod engine;
pub mod filter;
pub mod loader;
pub mod row;
pub mod session;
pub mod starred;
#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{PageFetcher, PaginationEngine, Progress, SessionOutcome};
pub use filter::LanguageFilter;
pub use loader::StarredLoader;
pub use row::Row;
pub use starred::{LoadingState, StarredState};
