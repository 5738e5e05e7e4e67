// Cache module for durable snapshot storage.
// Keeps each identity's starred list so later launches skip the network.

pub mod paths;
pub mod store;

pub use store::{CachedData, FileStore, MemoryStore, Snapshot, SnapshotStore};
