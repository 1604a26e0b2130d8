//! Typed annotation tag values.
//!
//! Each recognized tag is one variant of [`TagValue`]; parameterized
//! tags carry a named payload struct validated at parse time. The set
//! is closed: dispatch over tags is a `match`, not open-ended type
//! inspection.

use crate::error::TagError;
use crate::scan;
use serde::{Deserialize, Serialize};

/// Declaration level a tag may attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLevel {
    /// A type declaration.
    Type,
    /// A field declaration.
    Field,
}

/// Cardinality of a declared relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Single-to-single association.
    OneToOne,
    /// Single-to-many association (the inverse of a foreign key).
    OneToMany,
    /// Many-to-single association (the foreign-key side).
    ManyToOne,
    /// Many-to-many association (through a join table).
    ManyToMany,
}

impl RelationKind {
    /// The kind expected on the other end of the association.
    ///
    /// OneToOne and ManyToMany are their own opposites; OneToMany and
    /// ManyToOne are each other's.
    pub fn opposite(self) -> Self {
        match self {
            Self::OneToOne => Self::OneToOne,
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
            Self::ManyToMany => Self::ManyToMany,
        }
    }

    /// The `@Name` spelling of the relation tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of `@Table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableParams {
    /// Table name override.
    pub name: String,
}

/// Parameters of `@Column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnParams {
    /// Column name override.
    pub name: String,
}

/// Parameters of `@OrderBy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByParams {
    /// Ordering clause, passed through verbatim (`name ASC`).
    pub clause: String,
}

/// Parameters of `@OneToOne`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneToOneParams {
    /// Name of the inverse field on the destination entity.
    pub mapped_by: Option<String>,
    /// Name of the owning field on the destination entity.
    pub inverse: Option<String>,
}

/// Parameters of `@OneToMany`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneToManyParams {
    /// Name of the owning ManyToOne field on the destination entity.
    pub mapped_by: Option<String>,
}

/// Parameters of `@ManyToOne`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManyToOneParams {
    /// Foreign-key column name.
    pub join_column: Option<String>,
    /// Whether the association may be absent.
    pub optional: Option<bool>,
}

/// Parameters of `@ManyToMany`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManyToManyParams {
    /// Join table name (owning side).
    pub join_table: Option<String>,
    /// Column referencing the origin entity in the join table.
    pub join_column: Option<String>,
    /// Column referencing the destination entity in the join table.
    pub inverse_join_column: Option<String>,
    /// Name of the owning field on the destination entity.
    pub mapped_by: Option<String>,
}

/// A parsed, validated annotation tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagValue {
    /// `@Entity` — marks a type as persistent.
    Entity,
    /// `@Table(name = ...)` — overrides the table name.
    Table(TableParams),
    /// `@Id` — marks the identifier field.
    Id,
    /// `@Column(name = ...)` — overrides the column name.
    Column(ColumnParams),
    /// `@Transient` — excludes the field from metadata entirely.
    Transient,
    /// `@OrderBy(clause = ...)` — default ordering for the field.
    OrderBy(OrderByParams),
    /// `@OneToOne(...)`.
    OneToOne(OneToOneParams),
    /// `@OneToMany(...)`.
    OneToMany(OneToManyParams),
    /// `@ManyToOne(...)`.
    ManyToOne(ManyToOneParams),
    /// `@ManyToMany(...)`.
    ManyToMany(ManyToManyParams),
}

/// The relation tags only, with their parameter payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationTag {
    /// `@OneToOne(...)`.
    OneToOne(OneToOneParams),
    /// `@OneToMany(...)`.
    OneToMany(OneToManyParams),
    /// `@ManyToOne(...)`.
    ManyToOne(ManyToOneParams),
    /// `@ManyToMany(...)`.
    ManyToMany(ManyToManyParams),
}

impl RelationTag {
    /// Cardinality declared by this tag.
    pub fn kind(&self) -> RelationKind {
        match self {
            Self::OneToOne(_) => RelationKind::OneToOne,
            Self::OneToMany(_) => RelationKind::OneToMany,
            Self::ManyToOne(_) => RelationKind::ManyToOne,
            Self::ManyToMany(_) => RelationKind::ManyToMany,
        }
    }

    /// The `mappedBy` parameter, for the kinds that carry one.
    pub fn mapped_by(&self) -> Option<&str> {
        match self {
            Self::OneToOne(p) => p.mapped_by.as_deref(),
            Self::OneToMany(p) => p.mapped_by.as_deref(),
            Self::ManyToOne(_) => None,
            Self::ManyToMany(p) => p.mapped_by.as_deref(),
        }
    }

    /// The `inverse` parameter (OneToOne only).
    pub fn inverse(&self) -> Option<&str> {
        match self {
            Self::OneToOne(p) => p.inverse.as_deref(),
            _ => None,
        }
    }
}

impl TagValue {
    /// The `@Name` spelling of this tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Entity => "Entity",
            Self::Table(_) => "Table",
            Self::Id => "Id",
            Self::Column(_) => "Column",
            Self::Transient => "Transient",
            Self::OrderBy(_) => "OrderBy",
            Self::OneToOne(_) => "OneToOne",
            Self::OneToMany(_) => "OneToMany",
            Self::ManyToOne(_) => "ManyToOne",
            Self::ManyToMany(_) => "ManyToMany",
        }
    }

    /// Whether the tag may attach to the given declaration level.
    pub fn is_valid_for(&self, level: TagLevel) -> bool {
        match self {
            Self::Entity | Self::Table(_) => level == TagLevel::Type,
            _ => level == TagLevel::Field,
        }
    }

    /// The relation kind, for the four relation tags.
    pub fn relation_kind(&self) -> Option<RelationKind> {
        match self {
            Self::OneToOne(_) => Some(RelationKind::OneToOne),
            Self::OneToMany(_) => Some(RelationKind::OneToMany),
            Self::ManyToOne(_) => Some(RelationKind::ManyToOne),
            Self::ManyToMany(_) => Some(RelationKind::ManyToMany),
            _ => None,
        }
    }

    /// Convert a relation tag into its [`RelationTag`] payload.
    ///
    /// Returns the original value unchanged for non-relation tags.
    pub fn into_relation(self) -> Result<RelationTag, TagValue> {
        match self {
            Self::OneToOne(p) => Ok(RelationTag::OneToOne(p)),
            Self::OneToMany(p) => Ok(RelationTag::OneToMany(p)),
            Self::ManyToOne(p) => Ok(RelationTag::ManyToOne(p)),
            Self::ManyToMany(p) => Ok(RelationTag::ManyToMany(p)),
            other => Err(other),
        }
    }

    /// Parse `@Entity`.
    pub fn parse_entity(params: Option<&str>) -> Result<Self, TagError> {
        expect_no_params("Entity", params)?;
        Ok(Self::Entity)
    }

    /// Parse `@Id`.
    pub fn parse_id(params: Option<&str>) -> Result<Self, TagError> {
        expect_no_params("Id", params)?;
        Ok(Self::Id)
    }

    /// Parse `@Transient`.
    pub fn parse_transient(params: Option<&str>) -> Result<Self, TagError> {
        expect_no_params("Transient", params)?;
        Ok(Self::Transient)
    }

    /// Parse `@Table(name = ...)`.
    pub fn parse_table(params: Option<&str>) -> Result<Self, TagError> {
        let mut name = None;
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "name" => name = Some(value),
                _ => return Err(TagError::invalid_parameter("Table", &key)),
            }
        }
        let name = name.ok_or_else(|| TagError::missing_parameter("Table", "name"))?;
        Ok(Self::Table(TableParams { name }))
    }

    /// Parse `@Column(name = ...)`.
    pub fn parse_column(params: Option<&str>) -> Result<Self, TagError> {
        let mut name = None;
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "name" => name = Some(value),
                _ => return Err(TagError::invalid_parameter("Column", &key)),
            }
        }
        let name = name.ok_or_else(|| TagError::missing_parameter("Column", "name"))?;
        Ok(Self::Column(ColumnParams { name }))
    }

    /// Parse `@OrderBy(clause = ...)`.
    pub fn parse_order_by(params: Option<&str>) -> Result<Self, TagError> {
        let mut clause = None;
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "clause" => clause = Some(value),
                _ => return Err(TagError::invalid_parameter("OrderBy", &key)),
            }
        }
        let clause = clause.ok_or_else(|| TagError::missing_parameter("OrderBy", "clause"))?;
        Ok(Self::OrderBy(OrderByParams { clause }))
    }

    /// Parse `@OneToOne(mappedBy = ..., inverse = ...)`.
    pub fn parse_one_to_one(params: Option<&str>) -> Result<Self, TagError> {
        let mut p = OneToOneParams::default();
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "mappedBy" => p.mapped_by = Some(value),
                "inverse" => p.inverse = Some(value),
                _ => return Err(TagError::invalid_parameter("OneToOne", &key)),
            }
        }
        Ok(Self::OneToOne(p))
    }

    /// Parse `@OneToMany(mappedBy = ...)`.
    pub fn parse_one_to_many(params: Option<&str>) -> Result<Self, TagError> {
        let mut p = OneToManyParams::default();
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "mappedBy" => p.mapped_by = Some(value),
                _ => return Err(TagError::invalid_parameter("OneToMany", &key)),
            }
        }
        Ok(Self::OneToMany(p))
    }

    /// Parse `@ManyToOne(joinColumn = ..., optional = ...)`.
    pub fn parse_many_to_one(params: Option<&str>) -> Result<Self, TagError> {
        let mut p = ManyToOneParams::default();
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "joinColumn" => p.join_column = Some(value),
                "optional" => {
                    p.optional = Some(value.parse::<bool>().map_err(|_| {
                        TagError::invalid_boolean("ManyToOne", "optional", &value)
                    })?);
                }
                _ => return Err(TagError::invalid_parameter("ManyToOne", &key)),
            }
        }
        Ok(Self::ManyToOne(p))
    }

    /// Parse `@ManyToMany(joinTable = ..., joinColumn = ...,
    /// inverseJoinColumn = ..., mappedBy = ...)`.
    pub fn parse_many_to_many(params: Option<&str>) -> Result<Self, TagError> {
        let mut p = ManyToManyParams::default();
        for (key, value) in scan::key_values(params)? {
            match key.as_str() {
                "joinTable" => p.join_table = Some(value),
                "joinColumn" => p.join_column = Some(value),
                "inverseJoinColumn" => p.inverse_join_column = Some(value),
                "mappedBy" => p.mapped_by = Some(value),
                _ => return Err(TagError::invalid_parameter("ManyToMany", &key)),
            }
        }
        Ok(Self::ManyToMany(p))
    }
}

/// Reject any parameter on a marker tag.
fn expect_no_params(tag: &str, params: Option<&str>) -> Result<(), TagError> {
    if let Some((key, _)) = scan::key_values(params)?.into_iter().next() {
        return Err(TagError::invalid_parameter(tag, &key));
    }
    Ok(())
}
