//! Relationship (edge) types: marriage and parentage

use crate::person::PersonKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a relationship edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationId(pub Ulid);

impl RelationId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected marriage edge between two persons.
///
/// Endpoints are stored in normalized (sorted) order so every marriage
/// exists exactly once and is discoverable from either side. A person may
/// be party to at most one marriage at a time; that invariant is enforced
/// by the storage backend at write time, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marriage {
    /// Unique identifier
    pub id: RelationId,

    /// First endpoint (lexicographically smaller key)
    pub a: PersonKey,

    /// Second endpoint
    pub b: PersonKey,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Marriage {
    /// Create a marriage edge, normalizing the endpoint order.
    pub fn new(p1: PersonKey, p2: PersonKey) -> Self {
        let (a, b) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        Self {
            id: RelationId::new(),
            a,
            b,
            created_at: Utc::now(),
        }
    }

    pub fn involves(&self, key: &PersonKey) -> bool {
        &self.a == key || &self.b == key
    }

    /// The other endpoint, if `key` is one of the two.
    pub fn spouse_of(&self, key: &PersonKey) -> Option<&PersonKey> {
        if &self.a == key {
            Some(&self.b)
        } else if &self.b == key {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// A directed child→parent edge. Created in pairs (one per parent) by the
/// add-parentage operation; duplicate (child, parent) pairs collapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parentage {
    /// Unique identifier
    pub id: RelationId,

    /// The child
    pub child: PersonKey,

    /// The parent
    pub parent: PersonKey,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Parentage {
    pub fn new(child: PersonKey, parent: PersonKey) -> Self {
        Self {
            id: RelationId::new(),
            child,
            parent,
            created_at: Utc::now(),
        }
    }

    pub fn involves(&self, key: &PersonKey) -> bool {
        &self.child == key || &self.parent == key
    }
}

/// Kind tag on an exported tree edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Married,
    Child,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Married => write!(f, "married"),
            Self::Child => write!(f, "child"),
        }
    }
}

/// One edge of the exported family tree, as consumed by the external
/// visualization collaborator. For `Child` edges `a` is the child and `b`
/// the parent; for `Married` edges the pair is emitted once, never from
/// both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub a: PersonKey,
    pub b: PersonKey,
    pub kind: EdgeKind,
}

impl TreeEdge {
    pub fn married(a: PersonKey, b: PersonKey) -> Self {
        Self {
            a,
            b,
            kind: EdgeKind::Married,
        }
    }

    pub fn child(child: PersonKey, parent: PersonKey) -> Self {
        Self {
            a: child,
            b: parent,
            kind: EdgeKind::Child,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marriage_normalizes_endpoints() {
        let jane = PersonKey::new("Jane", "Doe");
        let john = PersonKey::new("John", "Doe");

        let m1 = Marriage::new(john.clone(), jane.clone());
        let m2 = Marriage::new(jane.clone(), john.clone());

        assert_eq!(m1.a, m2.a);
        assert_eq!(m1.b, m2.b);
        assert_eq!(m1.a, jane);
    }

    #[test]
    fn test_marriage_symmetric_lookup() {
        let jane = PersonKey::new("Jane", "Doe");
        let john = PersonKey::new("John", "Doe");
        let marriage = Marriage::new(john.clone(), jane.clone());

        assert_eq!(marriage.spouse_of(&john), Some(&jane));
        assert_eq!(marriage.spouse_of(&jane), Some(&john));
        assert_eq!(marriage.spouse_of(&PersonKey::new("Mike", "Doe")), None);
        assert!(marriage.involves(&john));
    }

    #[test]
    fn test_edge_kind_display() {
        assert_eq!(EdgeKind::Married.to_string(), "married");
        assert_eq!(EdgeKind::Child.to_string(), "child");
    }

    #[test]
    fn test_tree_edge_constructors() {
        let mike = PersonKey::new("Mike", "Doe");
        let john = PersonKey::new("John", "Doe");

        let edge = TreeEdge::child(mike.clone(), john.clone());
        assert_eq!(edge.a, mike);
        assert_eq!(edge.b, john);
        assert_eq!(edge.kind, EdgeKind::Child);
    }
}
