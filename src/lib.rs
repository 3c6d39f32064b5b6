pub mod config;
pub mod error;
pub mod ledger;
pub mod model;

pub use config::{Config, Store};
pub use error::{Result, ValidationIssue, WoningError};
