//! orgtree Snapshot
//!
//! Maps the nested records supplied by the persistence collaborator into a
//! store, and exports the current forest back into the same shape.
//!
//! Derived fields in the input (`level`, `path`, `totalUsers`) are ignored
//! and recomputed on load.

mod error;
mod load;
mod record;

pub use error::{SnapshotError, SnapshotResult};
pub use load::{export_forest, from_json, load_engine, load_store, to_json};
pub use record::NodeRecord;
