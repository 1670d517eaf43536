//! orgtree Core Types
//!
//! This crate provides the foundational types used throughout orgtree:
//! - Identity types (NodeId, UserId)
//! - Entity structures (OrganizationNode, OrganizationUser, Metadata)
//! - Engine configuration
//! - Common error types

mod config;
mod entity;
mod error;
mod id;

pub use config::*;
pub use entity::*;
pub use error::*;
pub use id::*;
