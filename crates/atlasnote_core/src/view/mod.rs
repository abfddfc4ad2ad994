//! Display-ready projections that are not tied to a query.
//!
//! # Responsibility
//! - Format timestamps as relative ages for list rendering.
//! - Aggregate collection statistics.

pub mod age;
pub mod stats;
