//! Display helpers shared by the forms and records.

pub mod datetime;

pub use datetime::{format_date, format_time};
