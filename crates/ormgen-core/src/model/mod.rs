//! Finished metadata model: the export handed to the code generator.

mod entity;
mod field;
mod relation;

pub use entity::EntityMetadata;
pub use field::FieldMetadata;
pub use relation::{Direction, EntityId, FieldRef, RelationLink};

use serde::{Deserialize, Serialize};

/// The validated set of entity metadata for one unit.
///
/// Entities and fields keep declaration order; relations
/// cross-reference by index. Immutable once returned by the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Entity metadata in declaration order.
    pub entities: Vec<EntityMetadata>,
}

impl Model {
    /// Get an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&EntityMetadata> {
        self.entities.get(id.0)
    }

    /// Find an entity and its id by declared type name.
    pub fn entity_by_name(&self, name: &str) -> Option<(EntityId, &EntityMetadata)> {
        self.entities
            .iter()
            .enumerate()
            .find(|(_, e)| e.name == name)
            .map(|(i, e)| (EntityId(i), e))
    }

    /// Get a field by reference.
    pub fn field(&self, field_ref: FieldRef) -> Option<&FieldMetadata> {
        self.entity(field_ref.entity)
            .and_then(|e| e.fields.get(field_ref.field))
    }

    pub(crate) fn field_mut(&mut self, field_ref: FieldRef) -> Option<&mut FieldMetadata> {
        self.entities
            .get_mut(field_ref.entity.0)
            .and_then(|e| e.fields.get_mut(field_ref.field))
    }

    /// All entity names, in declaration order.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// Check the bidirectional cross-references pair up: for every
    /// link with an opposite, the opposite's link points back at it.
    pub fn is_symmetric(&self) -> bool {
        for (ei, entity) in self.entities.iter().enumerate() {
            for (fi, field) in entity.fields.iter().enumerate() {
                let Some(link) = &field.relation else {
                    continue;
                };
                let here = FieldRef {
                    entity: EntityId(ei),
                    field: fi,
                };
                let Some(opposite) = link.opposite else {
                    continue;
                };
                let back = self
                    .field(opposite)
                    .and_then(|f| f.relation.as_ref())
                    .and_then(|l| l.opposite);
                if back != Some(here) {
                    return false;
                }
            }
        }
        true
    }
}
