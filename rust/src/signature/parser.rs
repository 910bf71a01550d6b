//! Recognizes `fn name(&self, a: A, ...) { unimplemented!("..."); }` stubs.
//!
//! Parsing runs as three anchored matches over an immutable slice: the
//! header, a loop over arguments, and the tail with the stub body. Each step
//! reports how many bytes it consumed, so a failure can say which part of
//! the declaration was wrong and nothing is accumulated before the header
//! has matched.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::grammar::{Fragment, Pattern};
use crate::signature::model::{Argument, FunctionSignature, ParsedStub, SourceRegion};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("offset {position} does not start a `[unsafe ]fn <name>(&self` declaration")]
    NotAFunctionHeader { position: usize },
    #[error("`{function}` at offset {position} does not have an `unimplemented!(\"...\");` body")]
    UnexpectedBody { function: String, position: usize },
}

/// Result of one anchored match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    pub consumed: usize,
    pub value: T,
}

/// What follows the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tail<'a> {
    pub return_type: Option<&'a str>,
    /// Relative to the slice handed to [`match_tail`].
    pub stub: SourceRegion,
}

struct Patterns {
    header: Regex,
    argument: Regex,
    tail: Regex,
}

impl Patterns {
    fn build() -> Result<Self, regex::Error> {
        use Fragment::*;

        let header = Pattern::new()
            .optional(Pattern::new().lit("unsafe").frag(RequiredSpace))
            .lit("fn")
            .frag(RequiredSpace)
            .capture("name", Ident)
            .lit("(")
            .frag(OptionalSpace)
            .lit("&")
            .optional(Pattern::new().lit("mut").frag(RequiredSpace))
            .lit("self")
            .word_boundary();

        let argument = Pattern::new()
            .lit(",")
            .frag(OptionalSpace)
            .capture("name", Ident)
            .lit(":")
            .frag(OptionalSpace)
            .capture("ty", Type)
            .frag(OptionalSpace);

        let stub_body = Pattern::new()
            .lit("unimplemented!")
            .frag(OptionalSpace)
            .lit("(")
            .frag(OptionalSpace)
            .frag(Str)
            .frag(OptionalSpace)
            .lit(")")
            .frag(OptionalSpace)
            .lit(";");

        let tail = Pattern::new()
            .optional(Pattern::new().lit(","))
            .frag(OptionalSpace)
            .lit(")")
            .frag(OptionalSpace)
            .optional(
                Pattern::new()
                    .lit("->")
                    .frag(OptionalSpace)
                    .capture("ret", Type)
                    .frag(OptionalSpace),
            )
            .lit("{")
            .frag(OptionalSpace)
            .capture_with("stub", stub_body);

        Ok(Self {
            header: header.anchored()?,
            argument: argument.anchored()?,
            tail: tail.anchored()?,
        })
    }
}

static PATTERNS: Lazy<Patterns> =
    Lazy::new(|| Patterns::build().expect("stub grammar patterns should be valid"));

/// `[unsafe ]fn <name>(&self`, yielding the function name.
pub fn match_header(input: &str) -> Option<Step<&str>> {
    let caps = PATTERNS.header.captures(input)?;
    Some(Step {
        consumed: caps.get(0)?.end(),
        value: caps.name("name")?.as_str(),
    })
}

/// `, <name>: <type>` with the surrounding optional whitespace.
pub fn match_argument(input: &str) -> Option<Step<Argument>> {
    let caps = PATTERNS.argument.captures(input)?;
    Some(Step {
        consumed: caps.get(0)?.end(),
        value: Argument::new(caps.name("name")?.as_str(), caps.name("ty")?.as_str()),
    })
}

/// As many arguments as match back to back. Never fails.
pub fn match_arguments(input: &str) -> Step<Vec<Argument>> {
    let mut consumed = 0;
    let mut arguments = Vec::new();
    while let Some(step) = match_argument(&input[consumed..]) {
        trace!(name = %step.value.name, ty = %step.value.type_text, "argument");
        consumed += step.consumed;
        arguments.push(step.value);
    }
    Step {
        consumed,
        value: arguments,
    }
}

/// `[,] ) [-> <type>] { unimplemented!("..."); `
pub fn match_tail(input: &str) -> Option<Step<Tail<'_>>> {
    let caps = PATTERNS.tail.captures(input)?;
    let stub = caps.name("stub")?;
    Some(Step {
        consumed: caps.get(0)?.end(),
        value: Tail {
            return_type: caps.name("ret").map(|m| m.as_str()),
            stub: SourceRegion::new(stub.start(), stub.end()),
        },
    })
}

/// Parse the stub function that starts exactly at byte `position` of `text`.
pub fn parse_signature(text: &str, position: usize) -> Result<ParsedStub, ParseError> {
    let not_a_header = || ParseError::NotAFunctionHeader { position };

    let input = text.get(position..).ok_or_else(not_a_header)?;
    let header = match_header(input).ok_or_else(not_a_header)?;
    debug!(function = header.value, position, "matched function header");

    let mut cursor = header.consumed;
    let arguments = match_arguments(&input[cursor..]);
    cursor += arguments.consumed;

    let tail = match_tail(&input[cursor..]).ok_or_else(|| ParseError::UnexpectedBody {
        function: header.value.to_string(),
        position,
    })?;
    let stub_span = tail.value.stub.offset_by(position + cursor);
    debug!(
        function = header.value,
        arguments = arguments.value.len(),
        stub_start = stub_span.start,
        stub_end = stub_span.end,
        "validated stub body"
    );

    Ok(ParsedStub {
        start: position,
        signature: FunctionSignature {
            name: header.value.to_string(),
            arguments: arguments.value,
            return_type: tail.value.return_type.map(str::to_string),
        },
        stub_span,
    })
}
