//! Persistence metadata from tagged declarations.
//!
//! A declaration [`Unit`] goes in, a validated [`Model`] comes out.
//! Types tagged `@Entity` in their comments become [`EntityMetadata`];
//! relation tags on fields are resolved across entities into
//! bidirectional [`RelationLink`]s where both sides are declared.
//!
//! ```
//! use ormgen_core::{build_model, BuildOptions, FieldDecl, FieldShape, TypeDecl, Unit};
//! use ormgen_core::lang::TagRegistry;
//!
//! let unit = Unit::new("store")
//!     .with_type(
//!         TypeDecl::new("Person")
//!             .with_comment("// @Entity")
//!             .with_comment("// @Table(name = persons)")
//!             .with_field(
//!                 FieldDecl::new("id", FieldShape::Other("uint".into()))
//!                     .with_comment("// @Id"),
//!             ),
//!     );
//!
//! let model = build_model(&unit, &TagRegistry::standard(), BuildOptions::default())
//!     .expect("no diagnostics");
//! assert_eq!(model.entities[0].table_name, "persons");
//! assert!(model.entities[0].fields[0].is_id);
//! ```

pub mod build;
pub mod decl;
pub mod error;
pub mod model;

mod resolve;
mod validate;

pub use build::{build_model, BuildOptions, Mode};
pub use decl::{FieldDecl, FieldShape, TypeDecl, Unit};
pub use error::{Diagnostic, DiagnosticKind};
pub use model::{
    Direction, EntityId, EntityMetadata, FieldMetadata, FieldRef, Model, RelationLink,
};

pub use ormgen_lang as lang;
pub use ormgen_lang::{RelationKind, RelationTag, TagRegistry};
