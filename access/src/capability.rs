//! Capability flags held by an actor.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

use crate::error::AccessError;

bitflags! {
    /// The set of capabilities an actor holds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CapabilitySet: u8 {
        /// Rename nodes and edit their metadata.
        const EDIT     = 0b0000_0001;
        /// Delete empty leaves.
        const DELETE   = 0b0000_0010;
        /// Create child nodes and roots.
        const CREATE   = 0b0000_0100;
        /// Assign and unassign users.
        const ASSIGN   = 0b0000_1000;
        /// Restructure anything, including cascading deletes.
        const MOVE_ANY = 0b0001_0000;
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl CapabilitySet {
    /// Parse capability names as supplied by the identity collaborator.
    pub fn parse_list<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, AccessError> {
        names
            .into_iter()
            .try_fold(Self::empty(), |set, name| Ok(set | name.parse::<Capability>()?.flag()))
    }
}

/// A single named capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Edit,
    Delete,
    Create,
    Assign,
    MoveAny,
}

impl Capability {
    pub fn flag(self) -> CapabilitySet {
        match self {
            Capability::Edit => CapabilitySet::EDIT,
            Capability::Delete => CapabilitySet::DELETE,
            Capability::Create => CapabilitySet::CREATE,
            Capability::Assign => CapabilitySet::ASSIGN,
            Capability::MoveAny => CapabilitySet::MOVE_ANY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::Edit => "edit",
            Capability::Delete => "delete",
            Capability::Create => "create",
            Capability::Assign => "assign",
            Capability::MoveAny => "moveAny",
        }
    }
}

impl FromStr for Capability {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "edit" => Ok(Capability::Edit),
            "delete" => Ok(Capability::Delete),
            "create" => Ok(Capability::Create),
            "assign" => Ok(Capability::Assign),
            "moveAny" | "move_any" => Ok(Capability::MoveAny),
            other => Err(AccessError::unknown_capability(other)),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
