//! Turns a parsed stub into its two edits: the delegating call in the
//! primary buffer and the matching enum variant in the secondary file.
//!
//! The edits are not transactional. The primary buffer is edited first and
//! stays edited if the secondary file cannot be located or saved.

pub mod buffer;
pub mod codegen;
pub mod enum_target;

use std::io;

use thiserror::Error;
use tracing::{debug, warn};

pub use buffer::{FsSecondaryFile, MemoryFile, SecondaryFile, SourceBuffer};
pub use enum_target::{EnumTarget, Insertion};

use crate::config::{ConfigError, GeneratorConfig};
use crate::signature::{FunctionSignature, SourceRegion};
use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("no `pub enum {enum_name}` declaration found in {file}")]
    EnumTargetNotFound { enum_name: String, file: String },
    #[error("failed to save {file}")]
    PersistFailed {
        file: String,
        #[source]
        source: io::Error,
    },
}

impl RewriteError {
    /// Last stage reached before the failure.
    pub fn stage(&self) -> Stage {
        match self {
            Self::EnumTargetNotFound { .. } => Stage::PrimaryEdited,
            Self::PersistFailed { .. } => Stage::SecondaryEdited,
        }
    }
}

/// What a successful rewrite changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    /// Replaced region of the primary buffer, before the edit.
    pub stub_span: SourceRegion,
    pub call: String,
    /// Insertion point in the secondary file, before the edit.
    pub insertion: SourceRegion,
    pub variant: String,
}

#[derive(Debug, Clone)]
pub struct Rewriter {
    call_macro: String,
    target: EnumTarget,
}

impl Rewriter {
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            call_macro: config.call_macro.clone(),
            target: EnumTarget::new(&config.enum_name)?,
        })
    }

    pub fn rewrite<P, S>(
        &self,
        signature: &FunctionSignature,
        stub_span: SourceRegion,
        primary: &mut P,
        secondary: &mut S,
    ) -> Result<RewriteReport, RewriteError>
    where
        P: SourceBuffer + ?Sized,
        S: SecondaryFile + ?Sized,
    {
        let call = codegen::call_expression(&self.call_macro, signature);
        primary.replace_region(stub_span, &call);
        debug!(stage = %Stage::PrimaryEdited, function = %signature.name, %call);

        let Some(insertion) = self.target.locate(secondary.text()) else {
            warn!(
                function = %signature.name,
                file = secondary.name(),
                "primary buffer was edited but the enum target is missing"
            );
            return Err(RewriteError::EnumTargetNotFound {
                enum_name: self.target.name().to_string(),
                file: secondary.name().to_string(),
            });
        };
        debug!(stage = %Stage::SecondaryLocated, file = secondary.name(), at = insertion.at);

        let mut variant = codegen::enum_variant(signature);
        if insertion.needs_newline {
            variant.insert(0, '\n');
        }
        secondary.replace_region(insertion.region(), &variant);
        debug!(stage = %Stage::SecondaryEdited, file = secondary.name());

        if let Err(source) = secondary.persist() {
            warn!(
                function = %signature.name,
                file = secondary.name(),
                error = %source,
                "primary buffer was edited but the secondary file was not saved"
            );
            return Err(RewriteError::PersistFailed {
                file: secondary.name().to_string(),
                source,
            });
        }
        debug!(stage = %Stage::Persisted, file = secondary.name());

        Ok(RewriteReport {
            stub_span,
            call,
            insertion: insertion.region(),
            variant,
        })
    }
}
