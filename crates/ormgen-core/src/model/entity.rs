//! Entity metadata records.

use super::field::FieldMetadata;
use serde::{Deserialize, Serialize};

/// Metadata for one persistent entity.
///
/// Only types carrying `@Entity` become one of these; everything else
/// is ignored by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Declared type name.
    pub name: String,
    /// Effective table name (defaults to the type name).
    pub table_name: String,
    /// Field metadata in declaration order.
    pub fields: Vec<FieldMetadata>,
}

impl EntityMetadata {
    /// Create entity metadata with the table name defaulted to the
    /// type name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            table_name: name.clone(),
            name,
            fields: Vec::new(),
        }
    }

    /// Find a field and its position by name.
    pub fn field_by_name(&self, name: &str) -> Option<(usize, &FieldMetadata)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.name == name)
    }

    /// The identifier field, if one was marked.
    pub fn id_field(&self) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.is_id)
    }
}
