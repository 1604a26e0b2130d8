//! ormgen annotation grammar
//!
//! This crate parses the inline tag syntax attached to type and field
//! declarations into typed, validated values.
//!
//! # Tag Syntax
//!
//! ```text
//! @Entity
//! @Table(name = persons)
//! @Id
//! @Column(name = id)
//! @Transient
//! @OrderBy(clause = name ASC)
//! @OneToOne(mappedBy = person)
//! @OneToMany(mappedBy = parent)
//! @ManyToOne(joinColumn = parent_id, optional = true)
//! @ManyToMany(joinTable = person_phones, joinColumn = person_id, inverseJoinColumn = phone_id)
//! ```
//!
//! Whitespace around `@`, the name, parens, `=`, and `,` is
//! insignificant; parameter values run to the next comma, so interior
//! whitespace is preserved. A comment line without a tag is inert.
//!
//! # Usage
//!
//! ```rust
//! use ormgen_lang::{TagOutcome, TagRegistry, TagValue};
//!
//! let registry = TagRegistry::standard();
//!
//! let outcome = registry.parse("// @Table(name = persons)").unwrap();
//! let TagOutcome::Tag(TagValue::Table(params)) = outcome else {
//!     panic!("expected a Table tag");
//! };
//! assert_eq!(params.name, "persons");
//!
//! // Unknown tags are returned as data; the caller decides policy.
//! assert_eq!(
//!     registry.parse("@Indexed").unwrap(),
//!     TagOutcome::Unknown("Indexed".to_string())
//! );
//! ```

pub mod error;
pub mod registry;
pub mod scan;
pub mod tag;

// Re-export main types
pub use error::{TagError, TagErrorKind};
pub use registry::{TagCtor, TagOutcome, TagRegistry};
pub use scan::{scan_line, RawTag};
pub use tag::{
    ColumnParams, ManyToManyParams, ManyToOneParams, OneToManyParams, OneToOneParams,
    OrderByParams, RelationKind, RelationTag, TableParams, TagLevel, TagValue,
};
