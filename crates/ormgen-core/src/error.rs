//! Diagnostics attributed to declarations.

use ormgen_lang::{TagError, TagErrorKind};
use thiserror::Error;

/// Kinds of fatal findings. Unknown tags are not here: they are
/// recovered silently at the point of occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A parameter key the tag does not recognize.
    InvalidParameterKey,
    /// A parameter item with no `=`.
    ParameterRequiresArgument,
    /// A boolean parameter whose value is not a strict `true`/`false`.
    InvalidBooleanValue,
    /// A tag attached at the wrong declaration level.
    TagNotValidAtThisLevel,
    /// A relation field whose declared type is neither a reference nor
    /// a sequence of references.
    UnknownFieldType,
    /// A relation whose destination is not a persistent entity in this
    /// unit.
    RelationDestinationNotEntity,
    /// More than one relation on a single field.
    TooManyRelationsOnField,
    /// A relation field whose declared shape does not match its
    /// cardinality.
    InvalidRelationShape,
    /// A required relation parameter was not supplied.
    MissingRequiredParameter,
    /// Mutually exclusive relation parameters both supplied.
    ConflictingParameters,
}

/// A fatal finding attributed to one declaration.
///
/// A diagnostic aborts metadata construction for its declaration only;
/// sibling declarations keep processing (in lenient mode). Any
/// diagnostic fails the unit's export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Diagnostic {
    /// The finding kind.
    pub kind: DiagnosticKind,
    /// Entity (type) the finding is attributed to.
    pub entity: String,
    /// Field the finding is attributed to, when field-level.
    pub field: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}: {}", self.entity, field, self.message),
            None => write!(f, "{}: {}", self.entity, self.message),
        }
    }
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        entity: impl Into<String>,
        field: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity: entity.into(),
            field: field.map(String::from),
            message: message.into(),
        }
    }

    /// Lift a tag parameter error onto a declaration.
    pub fn from_tag_error(entity: &str, field: Option<&str>, err: &TagError) -> Self {
        let kind = match err.kind {
            TagErrorKind::InvalidParameterKey => DiagnosticKind::InvalidParameterKey,
            TagErrorKind::ParameterRequiresArgument => DiagnosticKind::ParameterRequiresArgument,
            TagErrorKind::InvalidBooleanValue => DiagnosticKind::InvalidBooleanValue,
            TagErrorKind::MissingParameter => DiagnosticKind::MissingRequiredParameter,
        };
        Self::new(kind, entity, field, err.to_string())
    }

    /// A tag attached at the wrong declaration level.
    pub fn tag_not_valid(entity: &str, field: Option<&str>, tag: &str, level: &str) -> Self {
        Self::new(
            DiagnosticKind::TagNotValidAtThisLevel,
            entity,
            field,
            format!("@{} is not valid at {} level", tag, level),
        )
    }

    /// More than one relation tag on one field.
    pub fn too_many_relations(entity: &str, field: &str) -> Self {
        Self::new(
            DiagnosticKind::TooManyRelationsOnField,
            entity,
            Some(field),
            format!("field {} cannot have multiple relations", field),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_field() {
        let d = Diagnostic::too_many_relations("Person", "address");
        assert_eq!(
            d.to_string(),
            "Person.address: field address cannot have multiple relations"
        );

        let d = Diagnostic::tag_not_valid("Person", None, "Id", "type");
        assert_eq!(d.to_string(), "Person: @Id is not valid at type level");
    }

    #[test]
    fn test_tag_error_kind_mapping() {
        let err = TagError::missing_parameter("Table", "name");
        let d = Diagnostic::from_tag_error("Person", None, &err);
        assert_eq!(d.kind, DiagnosticKind::MissingRequiredParameter);
        assert_eq!(d.entity, "Person");
        assert_eq!(d.field, None);

        let err = TagError::invalid_boolean("ManyToOne", "optional", "maybe");
        let d = Diagnostic::from_tag_error("Person", Some("parent"), &err);
        assert_eq!(d.kind, DiagnosticKind::InvalidBooleanValue);
        assert_eq!(d.field.as_deref(), Some("parent"));
    }
}
