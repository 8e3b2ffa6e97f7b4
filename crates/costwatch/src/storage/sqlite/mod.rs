//! SQLite storage backend implementation.
//!
//! Uses `rusqlite` for the synchronous driver and `tokio-rusqlite` to run
//! it off the async runtime. Costs and reports live in two tables of the
//! same database file.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
