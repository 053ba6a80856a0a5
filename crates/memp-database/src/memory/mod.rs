//! In-memory implementation of every repository trait.
//!
//! Used by the `memory` database provider for local runs and by tests. The
//! operational tables return one row per event, without grouping, which is
//! the shape the aggregator has to cope with when storage cannot group.

mod store;

pub use store::MemoryStore;
