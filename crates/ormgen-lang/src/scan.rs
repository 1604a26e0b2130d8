//! Comment-line scanning for annotation tags.
//!
//! A tag occupies one comment line: `@Name` optionally followed by a
//! parenthesized parameter payload. Lines that do not start with a tag
//! are inert and ignored. Parameter values run to the next `,` or the
//! closing paren, so they may contain interior whitespace
//! (`clause = name ASC`).

use crate::error::TagError;
use regex::Regex;
use std::sync::LazyLock;

/// Matches `@Name` with an optional `(...)` payload at the start of a
/// comment line. A leading `//` (from raw comment text) is tolerated.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?://+\s*)?@\s*(\w+)\s*(?:\(([^)]*)\))?")
        .expect("tag pattern is a valid regex")
});

/// A detected tag before its parameters are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    /// Tag name, without the `@`.
    pub name: &'a str,
    /// Raw parameter payload, without the parens. `None` when the tag
    /// had no parens at all.
    pub params: Option<&'a str>,
}

/// Detect a tag in one comment line.
///
/// Returns `None` for inert lines, including arbitrary prose and lines
/// where an `@` appears mid-sentence.
pub fn scan_line(line: &str) -> Option<RawTag<'_>> {
    let caps = TAG_PATTERN.captures(line)?;
    let name = caps.get(1)?.as_str();
    let params = caps.get(2).map(|m| m.as_str());
    Some(RawTag { name, params })
}

/// Split a raw parameter payload into trimmed `(key, value)` pairs.
///
/// Items are separated by `,`; each item splits on its first `=`. An
/// item with no `=` is a [`TagErrorKind::ParameterRequiresArgument`]
/// error.
///
/// [`TagErrorKind::ParameterRequiresArgument`]: crate::error::TagErrorKind::ParameterRequiresArgument
pub fn key_values(payload: Option<&str>) -> Result<Vec<(String, String)>, TagError> {
    let Some(payload) = payload else {
        return Ok(Vec::new());
    };
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    for item in payload.split(',') {
        match item.split_once('=') {
            Some((key, value)) => pairs.push((key.trim().to_string(), value.trim().to_string())),
            None => return Err(TagError::argument_required(item)),
        }
    }
    Ok(pairs)
}
