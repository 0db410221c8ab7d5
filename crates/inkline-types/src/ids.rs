use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Stable identifier of a canonical published document.
///
/// Documents are owned by the publishing subsystem; the branching engine only
/// ever references them by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post:{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Globally unique branch identifier.
///
/// Generated once at branch creation (UUID v7, so ids of later branches sort
/// after earlier ones) and never reused, even after deletion. History entries
/// reference branches by this id forever.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BranchId(Uuid);

impl BranchId {
    /// Generate a fresh, globally unique branch id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID. Use [`BranchId::generate`] in production code.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BranchId({})", self.0)
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BranchId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidBranchRef {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// A reference to a line of content: either the document's virtual `main`
/// branch or a concrete branch record.
///
/// Main is never a physical branch row; APIs accept the `"main"` sentinel to
/// mean "the document's current published snapshot".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchRef {
    /// The document's canonical snapshot.
    Main,
    /// A concrete branch by id.
    Branch(BranchId),
}

impl BranchRef {
    /// The sentinel string accepted for the main branch.
    pub const MAIN: &'static str = "main";

    /// Parse a reference from its string form: `"main"` or a branch UUID.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s == Self::MAIN {
            Ok(Self::Main)
        } else {
            s.parse().map(Self::Branch)
        }
    }

    /// Returns `true` if this reference names the main branch.
    pub fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }
}

impl From<BranchId> for BranchRef {
    fn from(id: BranchId) -> Self {
        Self::Branch(id)
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str(Self::MAIN),
            Self::Branch(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_ids_are_unique() {
        let a = BranchId::generate();
        let b = BranchId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn later_branch_ids_sort_after_earlier_ones() {
        // UUID v7 embeds a millisecond timestamp; same-millisecond ids still
        // differ via random bits, so only assert ordering across many ids.
        let ids: Vec<BranchId> = (0..8).map(|_| BranchId::generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids.first(), sorted.first());
    }

    #[test]
    fn parse_main_sentinel() {
        let r = BranchRef::parse("main").unwrap();
        assert!(r.is_main());
        assert_eq!(r.to_string(), "main");
    }

    #[test]
    fn parse_branch_uuid() {
        let id = BranchId::generate();
        let r = BranchRef::parse(&id.to_string()).unwrap();
        assert_eq!(r, BranchRef::Branch(id));
    }

    #[test]
    fn parse_garbage_fails() {
        let err = BranchRef::parse("not-a-branch").unwrap_err();
        assert!(matches!(err, TypeError::InvalidBranchRef { .. }));
    }

    #[test]
    fn branch_id_display_roundtrip() {
        let id = BranchId::generate();
        let parsed: BranchId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_roundtrip() {
        let id = BranchId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: BranchId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
