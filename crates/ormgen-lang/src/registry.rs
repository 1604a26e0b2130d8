//! Name-to-constructor registry for annotation tags.

use crate::error::TagError;
use crate::scan;
use crate::tag::TagValue;
use std::collections::HashMap;

/// Constructor for a tag value from its raw parameter payload.
pub type TagCtor = fn(Option<&str>) -> Result<TagValue, TagError>;

/// The outcome of scanning one comment line against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// The line does not encode a tag.
    Inert,
    /// The line encodes a tag whose name is not registered. Policy
    /// (warn and skip, or fail) belongs to the caller.
    Unknown(String),
    /// A successfully parsed tag.
    Tag(TagValue),
}

/// Explicit mapping from tag names to constructors.
///
/// Lookup misses are returned as [`TagOutcome::Unknown`] rather than
/// logged internally, so callers decide the skip/fail policy.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    ctors: HashMap<String, TagCtor>,
}

impl TagRegistry {
    /// Create a registry with no tags registered.
    pub fn empty() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    /// Create a registry with the ten built-in tags.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("Entity", TagValue::parse_entity);
        registry.register("Table", TagValue::parse_table);
        registry.register("Id", TagValue::parse_id);
        registry.register("Column", TagValue::parse_column);
        registry.register("Transient", TagValue::parse_transient);
        registry.register("OrderBy", TagValue::parse_order_by);
        registry.register("OneToOne", TagValue::parse_one_to_one);
        registry.register("OneToMany", TagValue::parse_one_to_many);
        registry.register("ManyToOne", TagValue::parse_many_to_one);
        registry.register("ManyToMany", TagValue::parse_many_to_many);
        registry
    }

    /// Register a constructor for a tag name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, ctor: TagCtor) {
        self.ctors.insert(name.into(), ctor);
    }

    /// Whether a tag name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Scan one comment line and parse any tag it carries.
    pub fn parse(&self, line: &str) -> Result<TagOutcome, TagError> {
        let Some(raw) = scan::scan_line(line) else {
            return Ok(TagOutcome::Inert);
        };
        match self.ctors.get(raw.name) {
            None => Ok(TagOutcome::Unknown(raw.name.to_string())),
            Some(ctor) => ctor(raw.params).map(TagOutcome::Tag),
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_inert() {
        let registry = TagRegistry::standard();
        assert_eq!(
            registry.parse("// not a tag").unwrap(),
            TagOutcome::Inert
        );
    }

    #[test]
    fn test_parse_known_tag() {
        let registry = TagRegistry::standard();
        assert_eq!(
            registry.parse("// @Entity").unwrap(),
            TagOutcome::Tag(TagValue::Entity)
        );
    }

    #[test]
    fn test_unknown_tag_is_data_not_error() {
        let registry = TagRegistry::standard();
        assert_eq!(
            registry.parse("@Indexed").unwrap(),
            TagOutcome::Unknown("Indexed".to_string())
        );
    }

    #[test]
    fn test_parse_propagates_parameter_errors() {
        let registry = TagRegistry::standard();
        let err = registry.parse("@Table(size = 12)").unwrap_err();
        assert_eq!(err.kind, TagErrorKind::InvalidParameterKey);
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = TagRegistry::empty();
        assert_eq!(
            registry.parse("@Id").unwrap(),
            TagOutcome::Unknown("Id".to_string())
        );

        registry.register("Id", TagValue::parse_id);
        assert!(registry.contains("Id"));
        assert_eq!(
            registry.parse("@Id").unwrap(),
            TagOutcome::Tag(TagValue::Id)
        );
    }
}
