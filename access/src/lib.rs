//! orgtree Access
//!
//! Resolves which actions an actor may perform on a node.
//!
//! Capabilities are global: holding `edit` allows editing any node. The only
//! node-dependent rule is deletion, which needs either an empty leaf or the
//! `moveAny` capability.

mod capability;
mod error;
mod resolver;

pub use capability::{Capability, CapabilitySet};
pub use error::{AccessError, AccessResult};
pub use resolver::{authorize, authorize_root, resolve, Action, Permissions};
