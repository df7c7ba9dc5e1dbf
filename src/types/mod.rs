//! Shared data types for the audit.
//!
//! - `person`: canonical record produced by the node normalizer
//! - `page`: per-page cursor state read by the paginator
//! - `audit`: the derived sets and their counts

mod audit;
mod page;
mod person;

pub use audit::*;
pub use page::*;
pub use person::*;
