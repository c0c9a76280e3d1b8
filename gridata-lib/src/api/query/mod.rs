//! Query construction.
//!
//! This module provides the types that make up a structured list-read query
//! and their serialization into an OData-style query string.
//!
//! - [`QueryOptions`] - filter fragments, ordering, pagination, grouping
//! - [`OrderBy`] / [`Direction`] - ordering specification
//! - [`GroupBy`] / [`Aggregate`] - grouping transform (`$apply`)
//! - [`SimpleFilter`] - built-in parser producing predicate fragments

mod filter;
mod group;
mod options;
mod order;

pub use filter::Comparison;
pub use filter::FilterValue;
pub use filter::SimpleFilter;
pub use filter::escape_string;
pub use group::Aggregate;
pub use group::GroupBy;
pub use options::QueryOptions;
pub use order::Direction;
pub use order::OrderBy;
