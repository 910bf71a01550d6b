use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::grammar::is_identifier;

pub const DEFAULT_CALL_MACRO: &str = "simple";
pub const DEFAULT_ENUM_NAME: &str = "Call";
pub const DEFAULT_SECONDARY_FILE: &str = "call.rs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{value}` is not a valid {what} name")]
    InvalidIdentifier { what: &'static str, value: String },
    #[error("failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The names baked into generated code. The defaults are the fixed
/// `simple!` / `pub enum Call` / `call.rs` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Macro wrapping the delegating call.
    pub call_macro: String,
    /// Enum that receives one variant per generated method.
    pub enum_name: String,
    /// File holding that enum, relative to the primary file's directory.
    pub secondary_file: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            call_macro: DEFAULT_CALL_MACRO.to_string(),
            enum_name: DEFAULT_ENUM_NAME.to_string(),
            secondary_file: DEFAULT_SECONDARY_FILE.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (what, value) in [("macro", &self.call_macro), ("enum", &self.enum_name)] {
            if !is_identifier(value) {
                return Err(ConfigError::InvalidIdentifier {
                    what,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// The secondary file that sits next to `primary`.
    pub fn secondary_path(&self, primary: &Path) -> PathBuf {
        primary
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.secondary_file)
    }
}
