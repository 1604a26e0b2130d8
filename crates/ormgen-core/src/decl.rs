//! Input declaration tree.
//!
//! The external source parser produces this tree: an ordered list of
//! type declarations, each with its attached comment lines and an
//! ordered list of fields. The builder consumes it read-only.

use serde::{Deserialize, Serialize};

/// One compilation unit: the full set of declarations resolved
/// together in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit name (package or module of origin).
    pub name: String,
    /// Type declarations in source order.
    pub types: Vec<TypeDecl>,
}

impl Unit {
    /// Create an empty unit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Add a type declaration.
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }
}

/// A type declaration with its attached comments and fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Declared type name.
    pub name: String,
    /// Attached comment lines, in order.
    pub comments: Vec<String>,
    /// Field declarations in source order.
    pub fields: Vec<FieldDecl>,
}

impl TypeDecl {
    /// Create a type declaration with no comments or fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Attach a comment line.
    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    /// Add a field declaration.
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// A field declaration with its attached comments and declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Declared field name.
    pub name: String,
    /// Attached comment lines, in order.
    pub comments: Vec<String>,
    /// Declared type shape.
    pub shape: FieldShape,
}

impl FieldDecl {
    /// Create a field declaration with no comments.
    pub fn new(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            shape,
        }
    }

    /// Attach a comment line.
    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }
}

/// Declared shape of a field's type, pre-classified by the source
/// parser. One level of indirection only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldShape {
    /// A bare reference to the named type.
    Reference(String),
    /// A sequence of references to the named type.
    Sequence(String),
    /// Any other shape; the payload describes it for diagnostics.
    Other(String),
}

impl FieldShape {
    /// The referenced type name, for the shapes that carry one.
    pub fn referent(&self) -> Option<&str> {
        match self {
            Self::Reference(name) | Self::Sequence(name) => Some(name),
            Self::Other(_) => None,
        }
    }

    /// Whether this is a bare reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Whether this is a sequence of references.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_preserve_order() {
        let unit = Unit::new("store")
            .with_type(
                TypeDecl::new("Person")
                    .with_comment("@Entity")
                    .with_field(FieldDecl::new("id", FieldShape::Other("uint".into())))
                    .with_field(FieldDecl::new(
                        "address",
                        FieldShape::Reference("Address".into()),
                    )),
            )
            .with_type(TypeDecl::new("Address"));

        assert_eq!(unit.types.len(), 2);
        assert_eq!(unit.types[0].fields[0].name, "id");
        assert_eq!(unit.types[0].fields[1].name, "address");
    }

    #[test]
    fn test_shape_accessors() {
        let reference = FieldShape::Reference("Address".into());
        assert_eq!(reference.referent(), Some("Address"));
        assert!(reference.is_reference());
        assert!(!reference.is_sequence());

        let sequence = FieldShape::Sequence("Phone".into());
        assert_eq!(sequence.referent(), Some("Phone"));
        assert!(sequence.is_sequence());

        let other = FieldShape::Other("map of string to int".into());
        assert_eq!(other.referent(), None);
    }
}
