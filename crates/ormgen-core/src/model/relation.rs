//! Relation links between entity fields.
//!
//! Links cross-reference by index into the model store rather than by
//! direct mutual references, so a bidirectional association is a pair
//! of [`RelationLink`] records whose `opposite` indices point at each
//! other. That keeps ownership flat and makes the symmetry invariant
//! checkable by comparing indices.

use ormgen_lang::{RelationKind, RelationTag};
use serde::{Deserialize, Serialize};

/// Index of an entity within a [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub usize);

/// Index of a field within a model: owning entity plus field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    /// The owning entity.
    pub entity: EntityId,
    /// Position of the field within the entity, in declaration order.
    pub field: usize,
}

/// Directionality of a resolved relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// No inverse declaration was found; a valid outcome.
    Unidirectional,
    /// Linked to an inverse declaration on the destination entity.
    Bidirectional,
}

/// One side of a resolved association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationLink {
    /// Declared cardinality of this side.
    pub kind: RelationKind,
    /// Directionality after resolution.
    pub direction: Direction,
    /// The declaring tag's parameter payload.
    pub params: RelationTag,
    /// The field this side was declared on.
    pub origin: FieldRef,
    /// The destination entity.
    pub target: EntityId,
    /// The opposite side's field, when bidirectional.
    pub opposite: Option<FieldRef>,
}

impl RelationLink {
    /// Create an unresolved (unidirectional) link.
    pub fn unidirectional(params: RelationTag, origin: FieldRef, target: EntityId) -> Self {
        Self {
            kind: params.kind(),
            direction: Direction::Unidirectional,
            params,
            origin,
            target,
            opposite: None,
        }
    }

    /// Create one side of a bidirectional link.
    pub fn bidirectional(
        params: RelationTag,
        origin: FieldRef,
        target: EntityId,
        opposite: FieldRef,
    ) -> Self {
        Self {
            kind: params.kind(),
            direction: Direction::Bidirectional,
            params,
            origin,
            target,
            opposite: Some(opposite),
        }
    }

    /// Whether an inverse side was found.
    pub fn is_bidirectional(&self) -> bool {
        self.direction == Direction::Bidirectional
    }
}
