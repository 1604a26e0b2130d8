//! Metadata builder.
//!
//! Entry point for turning a declaration unit into a persistence
//! model. The pass runs in three phases: build entity and field
//! metadata from tags, resolve relations across entities, then
//! validate relation shapes and parameters. Diagnostics from any
//! phase fail the unit's export.

use ormgen_lang::{RelationTag, TagLevel, TagOutcome, TagRegistry, TagValue};
use tracing::{debug, warn};

use crate::decl::{FieldDecl, TypeDecl, Unit};
use crate::error::Diagnostic;
use crate::model::{EntityId, EntityMetadata, FieldMetadata, FieldRef, Model};
use crate::resolve::{self, PendingRelation};
use crate::validate;

/// Failure handling mode for a build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Stop at the first diagnostic.
    Strict,
    /// Collect every diagnostic before failing.
    #[default]
    Lenient,
}

/// Options for a build pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Failure handling mode.
    pub mode: Mode,
}

/// Build the persistence model for one unit.
///
/// Types whose comments carry no `@Entity` tag are skipped silently.
/// Any diagnostic fails the whole unit: the `Err` carries every
/// finding collected under the selected [`Mode`].
pub fn build_model(
    unit: &Unit,
    registry: &TagRegistry,
    options: BuildOptions,
) -> Result<Model, Vec<Diagnostic>> {
    let mut model = Model::default();
    let mut pending = Vec::new();
    let mut diagnostics = Vec::new();

    for decl in &unit.types {
        if !is_entity(decl, registry) {
            debug!(name = %decl.name, "type carries no @Entity tag, skipping");
            continue;
        }
        let id = EntityId(model.entities.len());
        if let Some(entity) =
            build_entity(decl, id, registry, options.mode, &mut pending, &mut diagnostics)
        {
            model.entities.push(entity);
        }
        if options.mode == Mode::Strict && !diagnostics.is_empty() {
            return Err(diagnostics);
        }
    }

    resolve::resolve_relations(&mut model, &pending, options.mode, &mut diagnostics);
    if options.mode == Mode::Strict && !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    validate::validate_relations(&model, &pending, options.mode, &mut diagnostics);

    if diagnostics.is_empty() {
        Ok(model)
    } else {
        Err(diagnostics)
    }
}

/// Whether any comment line on the declaration parses to `@Entity`.
/// Errors on other lines do not disqualify; they surface during entity
/// construction.
fn is_entity(decl: &TypeDecl, registry: &TagRegistry) -> bool {
    decl.comments
        .iter()
        .any(|line| matches!(registry.parse(line), Ok(TagOutcome::Tag(TagValue::Entity))))
}

/// Build one entity's metadata. A type-level diagnostic drops the
/// whole entity; a field-level diagnostic drops that field only.
fn build_entity(
    decl: &TypeDecl,
    id: EntityId,
    registry: &TagRegistry,
    mode: Mode,
    pending: &mut Vec<PendingRelation>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<EntityMetadata> {
    let mut entity = EntityMetadata::new(&decl.name);

    for line in &decl.comments {
        match registry.parse(line) {
            Ok(TagOutcome::Inert) => {}
            Ok(TagOutcome::Unknown(name)) => {
                warn!(entity = %decl.name, tag = %name, "unknown tag, ignoring");
            }
            Ok(TagOutcome::Tag(tag)) => {
                if !tag.is_valid_for(TagLevel::Type) {
                    diagnostics.push(Diagnostic::tag_not_valid(
                        &decl.name,
                        None,
                        tag.name(),
                        "type",
                    ));
                    return None;
                }
                if let TagValue::Table(p) = tag {
                    entity.table_name = p.name;
                }
            }
            Err(err) => {
                diagnostics.push(Diagnostic::from_tag_error(&decl.name, None, &err));
                return None;
            }
        }
    }

    for field in &decl.fields {
        match build_field(field, &decl.name, registry, diagnostics) {
            FieldOutcome::Built(metadata, relation) => {
                if let Some(tag) = relation {
                    pending.push(PendingRelation {
                        origin: FieldRef {
                            entity: id,
                            field: entity.fields.len(),
                        },
                        tag,
                        shape: field.shape.clone(),
                    });
                }
                entity.fields.push(metadata);
            }
            FieldOutcome::Transient => {
                debug!(entity = %decl.name, field = %field.name, "transient field, dropping");
            }
            FieldOutcome::Failed => {
                if mode == Mode::Strict {
                    break;
                }
            }
        }
    }

    Some(entity)
}

/// What became of one field declaration.
enum FieldOutcome {
    /// Metadata built, with its relation tag if one was declared.
    Built(FieldMetadata, Option<RelationTag>),
    /// Marked `@Transient`; excluded without a diagnostic.
    Transient,
    /// A diagnostic was recorded; the field is excluded.
    Failed,
}

/// Build one field's metadata from its comment tags.
///
/// All lines are parsed before anything is applied: `@Transient`
/// anywhere wins outright, even over malformed sibling tags.
fn build_field(
    decl: &FieldDecl,
    entity: &str,
    registry: &TagRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> FieldOutcome {
    let mut tags = Vec::new();
    let mut first_error = None;

    for line in &decl.comments {
        match registry.parse(line) {
            Ok(TagOutcome::Inert) => {}
            Ok(TagOutcome::Unknown(name)) => {
                warn!(entity = %entity, field = %decl.name, tag = %name, "unknown tag, ignoring");
            }
            Ok(TagOutcome::Tag(tag)) => tags.push(tag),
            Err(err) => {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    if tags.iter().any(|t| matches!(t, TagValue::Transient)) {
        return FieldOutcome::Transient;
    }
    if let Some(err) = first_error {
        diagnostics.push(Diagnostic::from_tag_error(entity, Some(&decl.name), &err));
        return FieldOutcome::Failed;
    }

    let mut metadata = FieldMetadata::new(&decl.name);
    let mut relation = None;

    for tag in tags {
        if !tag.is_valid_for(TagLevel::Field) {
            diagnostics.push(Diagnostic::tag_not_valid(
                entity,
                Some(&decl.name),
                tag.name(),
                "field",
            ));
            return FieldOutcome::Failed;
        }
        match tag.into_relation() {
            Ok(rel) => {
                if relation.is_some() {
                    diagnostics.push(Diagnostic::too_many_relations(entity, &decl.name));
                    return FieldOutcome::Failed;
                }
                relation = Some(rel);
            }
            Err(TagValue::Id) => metadata.is_id = true,
            Err(TagValue::Column(p)) => metadata.column_name = p.name,
            Err(TagValue::OrderBy(p)) => metadata.order_by = Some(p.clause),
            Err(_) => {}
        }
    }

    FieldOutcome::Built(metadata, relation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::FieldShape;
    use crate::error::DiagnosticKind;
    use pretty_assertions::assert_eq;

    fn registry() -> TagRegistry {
        TagRegistry::standard()
    }

    fn build(unit: &Unit) -> Result<Model, Vec<Diagnostic>> {
        build_model(unit, &registry(), BuildOptions::default())
    }

    fn plain_field(name: &str) -> FieldDecl {
        FieldDecl::new(name, FieldShape::Other("string".into()))
    }

    #[test]
    fn test_non_entity_types_are_skipped() {
        let unit = Unit::new("store")
            .with_type(
                TypeDecl::new("Person")
                    .with_comment("// @Entity")
                    .with_field(plain_field("name")),
            )
            .with_type(
                TypeDecl::new("Helper")
                    .with_comment("// just a comment")
                    .with_field(plain_field("count")),
            );

        let model = build(&unit).unwrap();
        assert_eq!(model.entity_names(), vec!["Person"]);
    }

    #[test]
    fn test_table_tag_overrides_table_name() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_comment("// @Table(name = persons)"),
        );

        let model = build(&unit).unwrap();
        assert_eq!(model.entities[0].table_name, "persons");
    }

    #[test]
    fn test_table_name_defaults_to_type_name() {
        let unit = Unit::new("store").with_type(TypeDecl::new("Person").with_comment("// @Entity"));
        let model = build(&unit).unwrap();
        assert_eq!(model.entities[0].table_name, "Person");
    }

    #[test]
    fn test_id_column_and_order_by() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_field(
                    plain_field("id")
                        .with_comment("// @Id")
                        .with_comment("// @Column(name = person_id)"),
                )
                .with_field(plain_field("name").with_comment("// @OrderBy(clause = name ASC)")),
        );

        let model = build(&unit).unwrap();
        let id = &model.entities[0].fields[0];
        assert!(id.is_id);
        assert_eq!(id.column_name, "person_id");
        let name = &model.entities[0].fields[1];
        assert_eq!(name.column_name, "name");
        assert_eq!(name.order_by.as_deref(), Some("name ASC"));
    }

    #[test]
    fn test_transient_field_is_dropped_silently() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_field(plain_field("name"))
                .with_field(plain_field("age").with_comment("// @Transient")),
        );

        let model = build(&unit).unwrap();
        let fields: Vec<_> = model.entities[0].fields.iter().map(|f| &f.name).collect();
        assert_eq!(fields, vec!["name"]);
    }

    #[test]
    fn test_transient_wins_over_malformed_sibling_tag() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_field(
                    plain_field("age")
                        .with_comment("// @Column(bogus = x)")
                        .with_comment("// @Transient"),
                ),
        );

        let model = build(&unit).unwrap();
        assert!(model.entities[0].fields.is_empty());
    }

    #[test]
    fn test_field_tag_at_type_level_drops_entity() {
        let unit = Unit::new("store")
            .with_type(
                TypeDecl::new("Person")
                    .with_comment("// @Entity")
                    .with_comment("// @Id"),
            )
            .with_type(TypeDecl::new("Address").with_comment("// @Entity"));

        let err = build(&unit).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].kind, DiagnosticKind::TagNotValidAtThisLevel);
        assert_eq!(err[0].entity, "Person");
        assert_eq!(err[0].field, None);
    }

    #[test]
    fn test_type_tag_at_field_level_drops_field() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_field(plain_field("name").with_comment("// @Table(name = t)"))
                .with_field(plain_field("age")),
        );

        let err = build(&unit).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].kind, DiagnosticKind::TagNotValidAtThisLevel);
        assert_eq!(err[0].field.as_deref(), Some("name"));
    }

    #[test]
    fn test_two_relation_tags_on_one_field() {
        let unit = Unit::new("store")
            .with_type(
                TypeDecl::new("Person")
                    .with_comment("// @Entity")
                    .with_field(
                        FieldDecl::new("address", FieldShape::Reference("Address".into()))
                            .with_comment("// @OneToOne(mappedBy = person)")
                            .with_comment("// @ManyToOne(joinColumn = address_id)"),
                    ),
            )
            .with_type(TypeDecl::new("Address").with_comment("// @Entity"));

        let err = build(&unit).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].kind, DiagnosticKind::TooManyRelationsOnField);
        assert_eq!(
            err[0].message,
            "field address cannot have multiple relations"
        );
    }

    #[test]
    fn test_unknown_tag_is_not_a_diagnostic() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_comment("// @Audited")
                .with_field(plain_field("name").with_comment("// @Sparkly(level = 11)")),
        );

        let model = build(&unit).unwrap();
        assert_eq!(model.entities[0].fields.len(), 1);
    }

    #[test]
    fn test_malformed_type_tag_drops_entity() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_comment("// @Table(nickname = persons)"),
        );

        let err = build(&unit).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].kind, DiagnosticKind::InvalidParameterKey);
        assert_eq!(err[0].entity, "Person");
    }

    #[test]
    fn test_strict_mode_stops_after_first_failing_type() {
        let unit = Unit::new("store")
            .with_type(
                TypeDecl::new("Person")
                    .with_comment("// @Entity")
                    .with_comment("// @Table()"),
            )
            .with_type(
                TypeDecl::new("Address")
                    .with_comment("// @Entity")
                    .with_comment("// @Table()"),
            );

        let strict = build_model(
            &unit,
            &registry(),
            BuildOptions { mode: Mode::Strict },
        )
        .unwrap_err();
        assert_eq!(strict.len(), 1);

        let lenient = build(&unit).unwrap_err();
        assert_eq!(lenient.len(), 2);
    }

    #[test]
    fn test_strict_mode_stops_after_first_failing_field() {
        let unit = Unit::new("store").with_type(
            TypeDecl::new("Person")
                .with_comment("// @Entity")
                .with_field(plain_field("a").with_comment("// @Column()"))
                .with_field(plain_field("b").with_comment("// @Column()")),
        );

        let strict = build_model(
            &unit,
            &registry(),
            BuildOptions { mode: Mode::Strict },
        )
        .unwrap_err();
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].field.as_deref(), Some("a"));

        let lenient = build(&unit).unwrap_err();
        assert_eq!(lenient.len(), 2);
    }

    #[test]
    fn test_empty_unit_builds_empty_model() {
        let model = build(&Unit::new("empty")).unwrap();
        assert!(model.entities.is_empty());
    }
}
