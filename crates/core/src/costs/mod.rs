mod error;
mod requests;
mod types;
mod validation;

pub use error::ValidationError;
pub use requests::{CreateCostRequest, ReportQuery};
pub use types::{Category, Cost, NewCost};
pub use validation::{validate_create_cost, validate_report_query, YearBounds};
