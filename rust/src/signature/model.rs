use serde::Serialize;

/// One `name: Type` parameter, in declaration order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    /// Raw type token, never parsed further.
    pub type_text: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    /// Everything after the receiver. `self` is never included.
    pub arguments: Vec<Argument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// A `start..end` byte range into one text buffer.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRegion {
    pub start: usize,
    pub end: usize,
}

impl SourceRegion {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// An empty region, i.e. an insertion point.
    pub fn at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn offset_by(self, delta: usize) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }
}

/// Everything one successful parse yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStub {
    /// Offset of the declaration (`unsafe` or `fn`).
    pub start: usize,
    pub signature: FunctionSignature,
    /// The `unimplemented!(...);` statement, the only text that gets replaced.
    pub stub_span: SourceRegion,
}
