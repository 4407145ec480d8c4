//! Rental aggregation and labelling.
//!
//! This module groups daily rental rows by day type and by weather
//! condition, attaches human-readable labels to the numeric codes, and
//! bundles the resulting tables into a report for a presenter.

pub mod aggregate;
pub mod analyzer;
pub mod labels;
pub mod types;
pub mod utility;
