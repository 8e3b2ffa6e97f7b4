pub mod about;
pub mod costs;
pub mod error;
pub mod health;
pub mod reports;

pub use error::ApiError;
