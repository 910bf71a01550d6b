//! The editing environment as seen by the rewriter.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::signature::SourceRegion;

/// A text buffer that can be edited in place.
pub trait SourceBuffer {
    fn text(&self) -> &str;

    /// Replace `region` with `new_text`. Both ends of `region` must lie on
    /// character boundaries of the current text.
    fn replace_region(&mut self, region: SourceRegion, new_text: &str);
}

impl SourceBuffer for String {
    fn text(&self) -> &str {
        self.as_str()
    }

    fn replace_region(&mut self, region: SourceRegion, new_text: &str) {
        self.replace_range(region.start..region.end, new_text);
    }
}

/// The file that holds the target enum.
pub trait SecondaryFile: SourceBuffer {
    /// Name used in messages.
    fn name(&self) -> &str;

    fn persist(&mut self) -> io::Result<()>;
}

/// A secondary file loaded from disk and written back on `persist`.
#[derive(Debug, Clone)]
pub struct FsSecondaryFile {
    path: PathBuf,
    name: String,
    text: String,
}

impl FsSecondaryFile {
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let name = path.display().to_string();
        Ok(Self { path, name, text })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceBuffer for FsSecondaryFile {
    fn text(&self) -> &str {
        &self.text
    }

    fn replace_region(&mut self, region: SourceRegion, new_text: &str) {
        self.text.replace_region(region, new_text);
    }
}

impl SecondaryFile for FsSecondaryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn persist(&mut self) -> io::Result<()> {
        fs::write(&self.path, &self.text)
    }
}

/// An in-memory secondary file. `persist` records a snapshot instead of
/// touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryFile {
    name: String,
    text: String,
    saved: Option<String>,
    saves: usize,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            saved: None,
            saves: 0,
        }
    }

    /// Text as of the last `persist`, if any.
    pub fn saved_text(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl SourceBuffer for MemoryFile {
    fn text(&self) -> &str {
        &self.text
    }

    fn replace_region(&mut self, region: SourceRegion, new_text: &str) {
        self.text.replace_region(region, new_text);
    }
}

impl SecondaryFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn persist(&mut self) -> io::Result<()> {
        self.saved = Some(self.text.clone());
        self.saves += 1;
        Ok(())
    }
}
