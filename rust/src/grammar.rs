//! Named lexical fragments and a builder that composes them into patterns.
//!
//! Every pattern the parser and the rewriter use is assembled here from a
//! handful of fragments, so the grammar reads as a sequence of tokens instead
//! of one long regular expression.

use once_cell::sync::Lazy;
use regex::Regex;

/// A reusable lexical fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    /// `ws*`: optional whitespace, newlines included.
    OptionalSpace,
    /// `ws+`: mandatory whitespace, newlines included.
    RequiredSpace,
    /// `ident`: alphanumerics and underscores.
    Ident,
    /// `type`: an optional `&mut ` marker followed by one opaque type token.
    Type,
    /// `string`: a double-quoted literal.
    Str,
}

const FRAGMENTS: &[(Fragment, &str, &str)] = &[
    (Fragment::OptionalSpace, "ws*", r"\s*"),
    (Fragment::RequiredSpace, "ws+", r"\s+"),
    (Fragment::Ident, "ident", r"[[:alnum:]_]+"),
    (Fragment::Type, "type", r"(?:&mut\s+)?[[:alnum:]_&<>\[\]]+"),
    (Fragment::Str, "string", r#""(?:[^"\\]|\\.)*""#),
];

impl Fragment {
    pub const ALL: [Fragment; 5] = [
        Fragment::OptionalSpace,
        Fragment::RequiredSpace,
        Fragment::Ident,
        Fragment::Type,
        Fragment::Str,
    ];

    /// Look a fragment up by its symbolic name (`"ws*"`, `"ident"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        FRAGMENTS
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(f, _, _)| *f)
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn pattern(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (Fragment, &'static str, &'static str) {
        // every variant has exactly one row in FRAGMENTS
        &FRAGMENTS[self as usize]
    }
}

/// Regex source built by concatenating literals and fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    source: String,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal text, escaped.
    pub fn lit(mut self, text: &str) -> Self {
        self.source.push_str(&regex::escape(text));
        self
    }

    pub fn frag(mut self, fragment: Fragment) -> Self {
        self.source.push_str("(?:");
        self.source.push_str(fragment.pattern());
        self.source.push(')');
        self
    }

    /// A fragment inside a named capture group.
    pub fn capture(self, name: &str, fragment: Fragment) -> Self {
        self.capture_with(name, Pattern::new().frag(fragment))
    }

    /// A whole sub-pattern inside a named capture group.
    pub fn capture_with(mut self, name: &str, inner: Pattern) -> Self {
        self.source.push_str("(?P<");
        self.source.push_str(name);
        self.source.push('>');
        self.source.push_str(&inner.source);
        self.source.push(')');
        self
    }

    /// Zero or one occurrence of `inner`.
    pub fn optional(mut self, inner: Pattern) -> Self {
        self.source.push_str("(?:");
        self.source.push_str(&inner.source);
        self.source.push_str(")?");
        self
    }

    pub fn word_boundary(mut self) -> Self {
        self.source.push_str(r"\b");
        self
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Compile so that a match must begin at the start of the input.
    pub fn anchored(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(r"\A(?:{})", self.source))
    }

    /// Compile so that the whole input must match.
    pub fn exact(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(r"\A(?:{})\z", self.source))
    }

    /// Compile for searching anywhere in the input.
    pub fn search(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.source)
    }
}

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Pattern::new()
        .frag(Fragment::Ident)
        .exact()
        .expect("identifier pattern should be valid")
});

/// Whether `text` is exactly one `ident` token.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}
