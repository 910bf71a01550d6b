//! The generate command: parse the stub under the cursor, then rewrite.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GeneratorConfig};
use crate::rewriter::{RewriteError, RewriteReport, Rewriter, SecondaryFile, SourceBuffer};
use crate::scanner::find_stubs;
use crate::signature::{parse_signature, FunctionSignature, ParseError};
use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

impl GenerateError {
    /// Last stage reached before the failure.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Parse(ParseError::NotAFunctionHeader { .. }) => Stage::Idle,
            Self::Parse(ParseError::UnexpectedBody { .. }) => Stage::HeaderMatched,
            Self::Rewrite(e) => e.stage(),
        }
    }

    /// Whether the primary buffer was modified before the failure.
    pub fn primary_edited(&self) -> bool {
        self.stage().primary_edited()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub signature: FunctionSignature,
    pub report: RewriteReport,
}

/// Outcome of [`StubGenerator::generate_all`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Completed invocations, in the order they ran.
    pub generated: Vec<Generated>,
    /// The invocation that stopped the batch, if any.
    pub failure: Option<GenerateError>,
}

#[derive(Debug, Clone)]
pub struct StubGenerator {
    rewriter: Rewriter,
}

impl StubGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rewriter: Rewriter::new(config)?,
        })
    }

    /// Run one invocation with the cursor at byte `position` of `primary`.
    pub fn generate<P, S>(
        &self,
        primary: &mut P,
        position: usize,
        secondary: &mut S,
    ) -> Result<Generated, GenerateError>
    where
        P: SourceBuffer + ?Sized,
        S: SecondaryFile + ?Sized,
    {
        debug!(stage = %Stage::Idle, position);
        let stub = parse_signature(primary.text(), position).map_err(|e| {
            debug!(stage = %Stage::Aborted, error = %e);
            e
        })?;
        debug!(stage = %Stage::BodyValidated, function = %stub.signature.name);

        let report =
            self.rewriter
                .rewrite(&stub.signature, stub.stub_span, primary, secondary)?;
        info!(
            function = %stub.signature.name,
            arguments = stub.signature.arguments.len(),
            file = secondary.name(),
            "generated delegating call and enum variant"
        );

        Ok(Generated {
            signature: stub.signature,
            report,
        })
    }

    /// Generate every stub in `primary`, first to last.
    ///
    /// Each invocation edits a working copy, which replaces `primary` only
    /// once its variant has been persisted. The batch stops at the first
    /// failure.
    pub fn generate_all<S>(&self, primary: &mut String, secondary: &mut S) -> BatchReport
    where
        S: SecondaryFile + ?Sized,
    {
        let mut batch = BatchReport::default();
        while let Some(next) = find_stubs(primary.as_str()).into_iter().next() {
            let mut working = primary.clone();
            match self.generate(&mut working, next.start, secondary) {
                Ok(generated) => {
                    *primary = working;
                    batch.generated.push(generated);
                }
                Err(e) => {
                    warn!(
                        function = %next.signature.name,
                        completed = batch.generated.len(),
                        error = %e,
                        "stopping batch generation"
                    );
                    batch.failure = Some(e);
                    break;
                }
            }
        }
        batch
    }
}
