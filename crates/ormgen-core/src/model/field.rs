//! Field metadata records.

use super::relation::RelationLink;
use serde::{Deserialize, Serialize};

/// Metadata for one non-transient field of an entity.
///
/// Transient fields are dropped by the builder and never exist here.
/// The field's position within its entity is its ordering hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Declared field name.
    pub name: String,
    /// Effective column name (defaults to the field name).
    pub column_name: String,
    /// Whether this field is the entity identifier.
    pub is_id: bool,
    /// Ordering clause from `@OrderBy`, passed through verbatim.
    pub order_by: Option<String>,
    /// At most one relation per field.
    pub relation: Option<RelationLink>,
}

impl FieldMetadata {
    /// Create field metadata with the column name defaulted to the
    /// field name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            column_name: name.clone(),
            name,
            is_id: false,
            order_by: None,
            relation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name_defaults_to_field_name() {
        let field = FieldMetadata::new("street");
        assert_eq!(field.name, "street");
        assert_eq!(field.column_name, "street");
        assert!(!field.is_id);
        assert!(field.relation.is_none());
    }
}
