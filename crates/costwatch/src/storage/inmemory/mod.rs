//! In-memory storage backend.
//!
//! Costs live in a `Vec` in insertion order and reports in an LRU map bounded
//! by `REPORT_CACHE_MAX_ENTRIES`, both wrapped in `Arc<RwLock<_>>`. Evicting a
//! report is harmless: the next read rebuilds it from the costs.
//!
//! # Example
//!
//! ```rust,ignore
//! use costwatch::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new(10_000);
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
