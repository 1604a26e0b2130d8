//! Shape and parameter consistency checks for declared relations.
//!
//! Runs after relation linking. To-one relations must be declared as a
//! bare reference and to-many relations as a sequence of references;
//! each relation kind additionally has a parameter completeness and
//! exclusivity rule on its own declaration.

use ormgen_lang::{RelationKind, RelationTag};

use crate::build::Mode;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::model::Model;
use crate::resolve::PendingRelation;

/// Validate every declared relation. One diagnostic per failing
/// declaration; in strict mode the sweep stops at the first one.
pub(crate) fn validate_relations(
    model: &Model,
    pending: &[PendingRelation],
    mode: Mode,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for p in pending {
        let Some(entity) = model.entity(p.origin.entity) else {
            continue;
        };
        let Some(field) = model.field(p.origin) else {
            continue;
        };

        if let Some(diagnostic) = check_shape(p, &entity.name, &field.name)
            .or_else(|| check_parameters(&p.tag, &entity.name, &field.name))
        {
            diagnostics.push(diagnostic);
            if mode == Mode::Strict {
                return;
            }
        }
    }
}

/// To-one kinds require a bare reference; to-many kinds a sequence of
/// references.
fn check_shape(p: &PendingRelation, entity: &str, field: &str) -> Option<Diagnostic> {
    let (ok, expected) = match p.tag.kind() {
        RelationKind::OneToOne | RelationKind::ManyToOne => {
            (p.shape.is_reference(), "a bare reference")
        }
        RelationKind::OneToMany | RelationKind::ManyToMany => {
            (p.shape.is_sequence(), "a sequence of references")
        }
    };
    if ok {
        return None;
    }
    Some(Diagnostic::new(
        DiagnosticKind::InvalidRelationShape,
        entity,
        Some(field),
        format!("{} requires field {} to be {}", p.tag.kind(), field, expected),
    ))
}

/// Per-kind parameter completeness and exclusivity, checked on the
/// declaring side. ManyToOne is always the owning side and carries no
/// rule of its own.
fn check_parameters(tag: &RelationTag, entity: &str, field: &str) -> Option<Diagnostic> {
    match tag {
        RelationTag::OneToOne(p) => match (&p.mapped_by, &p.inverse) {
            (Some(_), Some(_)) => Some(Diagnostic::new(
                DiagnosticKind::ConflictingParameters,
                entity,
                Some(field),
                "@OneToOne must set exactly one of [mappedBy, inverse], not both",
            )),
            (None, None) => Some(Diagnostic::new(
                DiagnosticKind::MissingRequiredParameter,
                entity,
                Some(field),
                "@OneToOne must set one of [mappedBy, inverse]",
            )),
            _ => None,
        },
        RelationTag::OneToMany(p) => p.mapped_by.is_none().then(|| {
            Diagnostic::new(
                DiagnosticKind::MissingRequiredParameter,
                entity,
                Some(field),
                "@OneToMany requires parameter [mappedBy]",
            )
        }),
        RelationTag::ManyToOne(_) => None,
        RelationTag::ManyToMany(p) => match (&p.mapped_by, &p.join_table) {
            (Some(_), Some(_)) => Some(Diagnostic::new(
                DiagnosticKind::ConflictingParameters,
                entity,
                Some(field),
                "@ManyToMany must set exactly one of [mappedBy, joinTable], not both",
            )),
            (None, None) => Some(Diagnostic::new(
                DiagnosticKind::MissingRequiredParameter,
                entity,
                Some(field),
                "@ManyToMany must set one of [mappedBy, joinTable]",
            )),
            (None, Some(_)) => {
                let missing = if p.join_column.is_none() {
                    Some("joinColumn")
                } else if p.inverse_join_column.is_none() {
                    Some("inverseJoinColumn")
                } else {
                    None
                };
                missing.map(|key| {
                    Diagnostic::new(
                        DiagnosticKind::MissingRequiredParameter,
                        entity,
                        Some(field),
                        format!("@ManyToMany with joinTable requires parameter [{}]", key),
                    )
                })
            }
            (Some(_), None) => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::FieldShape;
    use crate::model::{EntityId, EntityMetadata, FieldMetadata, FieldRef};
    use ormgen_lang::{
        ManyToManyParams, ManyToOneParams, OneToManyParams, OneToOneParams,
    };

    fn model_with_field(entity: &str, field: &str) -> Model {
        let mut e = EntityMetadata::new(entity);
        e.fields.push(FieldMetadata::new(field));
        Model { entities: vec![e] }
    }

    fn pending(tag: RelationTag, shape: FieldShape) -> Vec<PendingRelation> {
        vec![PendingRelation {
            origin: FieldRef {
                entity: EntityId(0),
                field: 0,
            },
            tag,
            shape,
        }]
    }

    fn run(tag: RelationTag, shape: FieldShape) -> Vec<Diagnostic> {
        let model = model_with_field("Person", "rel");
        let mut diagnostics = Vec::new();
        validate_relations(
            &model,
            &pending(tag, shape),
            Mode::Lenient,
            &mut diagnostics,
        );
        diagnostics
    }

    fn many_to_many(
        mapped_by: Option<&str>,
        join_table: Option<&str>,
        join_column: Option<&str>,
        inverse_join_column: Option<&str>,
    ) -> RelationTag {
        RelationTag::ManyToMany(ManyToManyParams {
            join_table: join_table.map(String::from),
            join_column: join_column.map(String::from),
            inverse_join_column: inverse_join_column.map(String::from),
            mapped_by: mapped_by.map(String::from),
        })
    }

    #[test]
    fn test_to_one_requires_bare_reference() {
        let diags = run(
            RelationTag::OneToOne(OneToOneParams {
                mapped_by: Some("x".into()),
                inverse: None,
            }),
            FieldShape::Sequence("Address".into()),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::InvalidRelationShape);
        assert!(diags[0].message.contains("bare reference"));
    }

    #[test]
    fn test_to_many_requires_sequence() {
        let diags = run(
            RelationTag::OneToMany(OneToManyParams {
                mapped_by: Some("parent".into()),
            }),
            FieldShape::Reference("Person".into()),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::InvalidRelationShape);
        assert!(diags[0].message.contains("sequence of references"));
    }

    #[test]
    fn test_one_to_one_exclusivity() {
        let both = run(
            RelationTag::OneToOne(OneToOneParams {
                mapped_by: Some("a".into()),
                inverse: Some("b".into()),
            }),
            FieldShape::Reference("Address".into()),
        );
        assert_eq!(both[0].kind, DiagnosticKind::ConflictingParameters);

        let neither = run(
            RelationTag::OneToOne(OneToOneParams::default()),
            FieldShape::Reference("Address".into()),
        );
        assert_eq!(neither[0].kind, DiagnosticKind::MissingRequiredParameter);

        let ok = run(
            RelationTag::OneToOne(OneToOneParams {
                mapped_by: None,
                inverse: Some("b".into()),
            }),
            FieldShape::Reference("Address".into()),
        );
        assert!(ok.is_empty());
    }

    #[test]
    fn test_one_to_many_requires_mapped_by() {
        let diags = run(
            RelationTag::OneToMany(OneToManyParams::default()),
            FieldShape::Sequence("Person".into()),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MissingRequiredParameter);
        assert!(diags[0].message.contains("mappedBy"));
    }

    #[test]
    fn test_many_to_one_has_no_parameter_rule() {
        let diags = run(
            RelationTag::ManyToOne(ManyToOneParams::default()),
            FieldShape::Reference("Person".into()),
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_many_to_many_exclusivity_and_completeness() {
        let shape = || FieldShape::Sequence("Phone".into());

        let both = run(many_to_many(Some("x"), Some("t"), None, None), shape());
        assert_eq!(both[0].kind, DiagnosticKind::ConflictingParameters);

        let neither = run(many_to_many(None, None, None, None), shape());
        assert_eq!(neither[0].kind, DiagnosticKind::MissingRequiredParameter);

        let missing_join_column = run(many_to_many(None, Some("t"), None, Some("i")), shape());
        assert_eq!(
            missing_join_column[0].kind,
            DiagnosticKind::MissingRequiredParameter
        );
        assert!(missing_join_column[0].message.contains("[joinColumn]"));

        let missing_inverse = run(many_to_many(None, Some("t"), Some("j"), None), shape());
        assert!(missing_inverse[0].message.contains("[inverseJoinColumn]"));

        let owning_ok = run(many_to_many(None, Some("t"), Some("j"), Some("i")), shape());
        assert!(owning_ok.is_empty());

        let inverse_ok = run(many_to_many(Some("x"), None, None, None), shape());
        assert!(inverse_ok.is_empty());
    }

    #[test]
    fn test_shape_diagnostic_suppresses_parameter_check() {
        // One diagnostic per failing declaration: the shape error
        // aborts that declaration's validation.
        let diags = run(
            RelationTag::OneToMany(OneToManyParams::default()),
            FieldShape::Reference("Person".into()),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::InvalidRelationShape);
    }
}
