//! Report materialization and invalidation.
//!
//! - [`ReportBuilder`] aggregates raw costs into report details.
//! - [`ReportService`] is the read path: serve a stored report, or build,
//!   store and return one on a miss.
//! - [`CostService`] is the write path: validate, persist, then drop the
//!   stored report for the cost's month.
//!
//! There is no locking across these steps. A read racing a write on the same
//! month can store a report that misses the new cost if the write's
//! invalidation lands first; that report then stays until the next write to
//! the month. With [`InvalidationMode::Deferred`](crate::config::InvalidationMode)
//! the window also covers the gap between responding and invalidating.

mod builder;
mod costs;
mod error;
mod reports;

pub use builder::ReportBuilder;
pub use costs::CostService;
pub use error::ServiceError;
pub use reports::ReportService;
