//! Relation resolver.
//!
//! For each field carrying a relation tag, locate the destination
//! entity, scan its fields for a matching inverse declaration, and
//! link both sides. A relation with no inverse anywhere in the unit
//! stays unidirectional; that is a valid outcome, not an error.

use std::collections::HashMap;

use ormgen_lang::RelationTag;
use tracing::debug;

use crate::build::Mode;
use crate::decl::FieldShape;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::model::{FieldRef, Model, RelationLink};

/// A relation tag recorded by the builder, awaiting resolution.
#[derive(Debug, Clone)]
pub(crate) struct PendingRelation {
    /// The field the tag was declared on.
    pub origin: FieldRef,
    /// The declared tag with its parameters.
    pub tag: RelationTag,
    /// The origin field's declared shape.
    pub shape: FieldShape,
}

/// Resolve all pending relations against the built entities, in
/// declaration order. Diagnostics are per-field; in strict mode the
/// sweep stops at the first one.
pub(crate) fn resolve_relations(
    model: &mut Model,
    pending: &[PendingRelation],
    mode: Mode,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // Every declared relation tag, addressable by field, for inverse
    // scanning.
    let declared: HashMap<FieldRef, &RelationTag> =
        pending.iter().map(|p| (p.origin, &p.tag)).collect();

    for p in pending {
        // Names for diagnostics; the builder guarantees the indices.
        let Some(entity_name) = model.entity(p.origin.entity).map(|e| e.name.clone()) else {
            continue;
        };
        let Some(origin_name) = model.field(p.origin).map(|f| f.name.clone()) else {
            continue;
        };

        // Already linked as the inverse of an earlier origin.
        if model.field(p.origin).is_some_and(|f| f.relation.is_some()) {
            continue;
        }

        let Some(dest_name) = p.shape.referent() else {
            let FieldShape::Other(desc) = &p.shape else {
                continue;
            };
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnknownFieldType,
                &entity_name,
                Some(&origin_name),
                format!("unknown field type: {}", desc),
            ));
            if mode == Mode::Strict {
                return;
            }
            continue;
        };

        let Some((dest_id, dest)) = model.entity_by_name(dest_name) else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::RelationDestinationNotEntity,
                &entity_name,
                Some(&origin_name),
                format!("relation destination {} is not a persistent entity", dest_name),
            ));
            if mode == Mode::Strict {
                return;
            }
            continue;
        };

        // Scan destination fields in declaration order for the first
        // inverse declaration of the opposite kind whose back-reference
        // matches. First match wins.
        let opposite_kind = p.tag.kind().opposite();
        let mut matched: Option<(FieldRef, RelationTag)> = None;
        for (j, candidate) in dest.fields.iter().enumerate() {
            let candidate_ref = FieldRef {
                entity: dest_id,
                field: j,
            };
            if candidate_ref == p.origin {
                continue;
            }
            let Some(candidate_tag) = declared.get(&candidate_ref) else {
                continue;
            };
            if candidate_tag.kind() != opposite_kind {
                continue;
            }
            if back_reference_matches(&origin_name, &p.tag, &candidate.name, candidate_tag) {
                matched = Some((candidate_ref, (*candidate_tag).clone()));
                break;
            }
        }

        match matched {
            None => {
                debug!(
                    entity = %entity_name,
                    field = %origin_name,
                    "no inverse declaration found, relation stays unidirectional"
                );
                if let Some(field) = model.field_mut(p.origin) {
                    field.relation = Some(RelationLink::unidirectional(
                        p.tag.clone(),
                        p.origin,
                        dest_id,
                    ));
                }
            }
            Some((candidate_ref, candidate_tag)) => {
                let candidate_name = model
                    .field(candidate_ref)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                if model
                    .field(candidate_ref)
                    .is_some_and(|f| f.relation.is_some())
                {
                    // The inverse slot is already taken by another
                    // origin; the error belongs to the destination
                    // field, not this one.
                    diagnostics.push(Diagnostic::too_many_relations(dest_name, &candidate_name));
                    if mode == Mode::Strict {
                        return;
                    }
                    continue;
                }

                if let Some(field) = model.field_mut(p.origin) {
                    field.relation = Some(RelationLink::bidirectional(
                        p.tag.clone(),
                        p.origin,
                        dest_id,
                        candidate_ref,
                    ));
                }
                if let Some(field) = model.field_mut(candidate_ref) {
                    field.relation = Some(RelationLink::bidirectional(
                        candidate_tag,
                        candidate_ref,
                        p.origin.entity,
                        p.origin,
                    ));
                }
                debug!(
                    entity = %entity_name,
                    field = %origin_name,
                    inverse = %candidate_name,
                    "linked bidirectional relation"
                );
            }
        }
    }
}

/// Whether a candidate inverse declaration's back-reference matches
/// the origin field. Both directions are checked, so resolution does
/// not depend on which side the sweep reaches first.
fn back_reference_matches(
    origin_name: &str,
    origin_tag: &RelationTag,
    candidate_name: &str,
    candidate_tag: &RelationTag,
) -> bool {
    match (origin_tag, candidate_tag) {
        (RelationTag::OneToOne(origin), RelationTag::OneToOne(candidate)) => {
            candidate.inverse.as_deref() == Some(origin_name)
                || origin.inverse.as_deref() == Some(candidate_name)
        }
        // The OneToMany side's mappedBy names the owning ManyToOne
        // field, whichever side the sweep starts from.
        (RelationTag::OneToMany(origin), RelationTag::ManyToOne(_)) => {
            origin.mapped_by.as_deref() == Some(candidate_name)
        }
        (RelationTag::ManyToOne(_), RelationTag::OneToMany(candidate)) => {
            candidate.mapped_by.as_deref() == Some(origin_name)
        }
        (RelationTag::ManyToMany(origin), RelationTag::ManyToMany(candidate)) => {
            candidate.mapped_by.as_deref() == Some(origin_name)
                || origin.mapped_by.as_deref() == Some(candidate_name)
        }
        _ => false,
    }
}
