//! orgtree View
//!
//! What the rendering layer needs to draw the tree:
//! - Per-session expansion state, with search-forced expansion kept apart
//! - A view model per node, combining derived fields, permissions and matches
//! - The flattened list of visible rows

mod expansion;
mod row;

pub use expansion::ExpansionState;
pub use row::{visible_rows, NodeView, ViewContext, VisibleRow};
