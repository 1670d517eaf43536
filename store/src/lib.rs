//! orgtree Node Store
//!
//! This crate owns the canonical forest:
//! - Node storage keyed by id (an arena; nodes refer to each other by id only)
//! - Ordered root list and ordered child lists
//! - User placement index: which node each user is assigned to
//! - Retired id tracking so deleted ids are never reused
//!
//! Structural methods report what became stale through an [`Invalidation`];
//! derived fields are recomputed by `orgtree-layout`.

mod index;
mod store;

pub use store::*;
