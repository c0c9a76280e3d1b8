//! Data-grid client library
//!
//! Reusable plumbing for server-driven data tables over an OData-flavored
//! REST backend: a thin async resource client, query-option serialization,
//! and the client-side table view-state core (filters, sort, pagination,
//! grouping) that drives it.

pub mod api;
pub mod error;
pub mod i18n;
pub mod response;
pub mod table;
pub mod week;

mod client;

pub use client::*;
pub use response::Envelope;
pub use response::GroupRow;
