use regex::Regex;

use crate::config::ConfigError;
use crate::grammar::{is_identifier, Fragment, Pattern};
use crate::lexical::{is_masked, literal_end, non_code_ranges};
use crate::signature::SourceRegion;

/// Where a new variant goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub at: usize,
    /// The closing brace shares its line with other code, so the variant has
    /// to start on a fresh line.
    pub needs_newline: bool,
}

impl Insertion {
    pub fn region(&self) -> SourceRegion {
        SourceRegion::at(self.at)
    }
}

/// Finds `pub enum <name> { ... }` and the spot just before its closing brace.
#[derive(Debug, Clone)]
pub struct EnumTarget {
    name: String,
    marker: Regex,
}

impl EnumTarget {
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        if !is_identifier(name) {
            return Err(ConfigError::InvalidIdentifier {
                what: "enum",
                value: name.to_string(),
            });
        }
        let marker = Pattern::new()
            .word_boundary()
            .lit("pub")
            .frag(Fragment::RequiredSpace)
            .lit("enum")
            .frag(Fragment::RequiredSpace)
            .lit(name)
            .word_boundary()
            .search()?;
        Ok(Self {
            name: name.to_string(),
            marker,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insertion point for the first matching declaration, or `None` when
    /// there is no declaration, it has no body, or its braces never balance.
    pub fn locate(&self, text: &str) -> Option<Insertion> {
        let masked = non_code_ranges(text);
        let marker = self
            .marker
            .find_iter(text)
            .find(|m| !is_masked(&masked, m.start()))?;
        let open = marker.end() + body_offset(&text[marker.end()..])?;
        let close = closing_brace(text, open)?;

        let line_start = text[..close].rfind('\n').map_or(0, |i| i + 1);
        if text[line_start..close].trim().is_empty() {
            Some(Insertion {
                at: line_start,
                needs_newline: false,
            })
        } else {
            Some(Insertion {
                at: close,
                needs_newline: true,
            })
        }
    }
}

/// Offset of the `{` opening the enum body. Only generics and a `where`
/// clause may sit between the name and the brace.
fn body_offset(rest: &str) -> Option<usize> {
    let open = rest.find(['{', ';', '}'])?;
    if !rest[open..].starts_with('{') {
        return None;
    }
    let between = rest[..open].trim();
    let allowed = between.is_empty()
        || between.starts_with('<')
        || (between.starts_with("where")
            && !between[5..].starts_with(|c: char| c.is_alphanumeric() || c == '_'));
    allowed.then_some(open)
}

/// Offset of the `}` that balances the `{` at `open`. Braces inside
/// comments and string or char literals are ignored.
fn closing_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(end) = literal_end(text, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
