pub mod model;
pub mod parser;

pub use model::{Argument, FunctionSignature, ParsedStub, SourceRegion};
pub use parser::{parse_signature, ParseError};
