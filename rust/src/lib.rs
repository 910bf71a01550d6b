pub mod config;
pub mod generator;
pub mod grammar;
pub mod lexical;
pub mod rewriter;
pub mod scanner;
pub mod signature;
pub mod stage;

// Re-export main types and functions
pub use config::{ConfigError, GeneratorConfig};
pub use generator::{BatchReport, GenerateError, Generated, StubGenerator};
pub use rewriter::{
    FsSecondaryFile, MemoryFile, RewriteError, RewriteReport, Rewriter, SecondaryFile,
    SourceBuffer,
};
pub use scanner::{find_stubs, scan_path, StubRecord};
pub use signature::{
    parse_signature, Argument, FunctionSignature, ParseError, ParsedStub, SourceRegion,
};
pub use stage::Stage;
