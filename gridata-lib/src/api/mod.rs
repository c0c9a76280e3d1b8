//! API surface: resource CRUD operations and query construction.

pub mod multipart;
pub mod query;

mod resource;

pub use resource::*;
