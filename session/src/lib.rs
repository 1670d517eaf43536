//! orgtree Session
//!
//! One tree-view session over one forest.
//!
//! Responsibilities:
//! - Apply mutations, optionally on behalf of an actor whose capabilities are checked
//! - Journal applied mutations and undo them
//! - Keep the search index, the active search and expansion state in step

mod error;
mod session;

pub use error::{SessionError, SessionResult};
pub use session::OrgSession;
