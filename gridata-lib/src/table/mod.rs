//! Table view-state and the column filter protocol.
//!
//! [`ViewState`] is the complete client-side interaction state of a
//! server-driven table. It is owned by the table instance and mutated only
//! through the single transition function [`ViewState::reconcile`]; every
//! state change maps to the query options for the next read via
//! [`ViewState::query_options`].

mod filter;
mod state;

pub use filter::ColumnFilter;
pub use filter::Popover;
pub use state::Pagination;
pub use state::ViewState;
