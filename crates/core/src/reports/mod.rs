mod aggregation;
mod types;

pub use aggregation::{build_report_details, empty_details};
pub use types::{Report, ReportDetails, ReportItem, ReportKey};
