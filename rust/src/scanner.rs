use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::grammar::{Fragment, Pattern};
use crate::lexical::{is_masked, non_code_ranges};
use crate::signature::{parse_signature, Argument, ParsedStub};

static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Pattern::new()
        .word_boundary()
        .optional(Pattern::new().lit("unsafe").frag(Fragment::RequiredSpace))
        .lit("fn")
        .frag(Fragment::RequiredSpace)
        .search()
        .expect("candidate pattern should be valid")
});

/// Every stub function in `text`, in source order. Declarations inside
/// comments and string literals are skipped.
pub fn find_stubs(text: &str) -> Vec<ParsedStub> {
    let masked = non_code_ranges(text);
    CANDIDATE
        .find_iter(text)
        .filter(|m| !is_masked(&masked, m.start()))
        .filter_map(|m| parse_signature(text, m.start()).ok())
        .collect()
}

#[derive(Serialize, Debug, Clone)]
pub struct StubRecord {
    pub path: String,
    pub line: usize,
    pub name: String,
    pub arguments: Vec<Argument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// Build output below the scan root.
fn is_excluded(root: &Path, p: &Path) -> bool {
    p.strip_prefix(root)
        .map(|rel| rel.components().any(|c| c.as_os_str() == "target"))
        .unwrap_or(false)
}

/// Stubs in one `.rs` file, or in every `.rs` file below a directory.
pub fn scan_path(root: &Path) -> Result<Vec<StubRecord>> {
    if root.is_file() {
        let base = root.parent().unwrap_or_else(|| Path::new(""));
        return scan_file(base, root);
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() || is_excluded(root, path) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        match scan_file(root, path) {
            Ok(mut v) => out.append(&mut v),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping file"),
        }
    }
    Ok(out)
}

fn scan_file(root: &Path, file: &Path) -> Result<Vec<StubRecord>> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let rel_path = pathdiff::diff_paths(file, root)
        .unwrap_or_else(|| PathBuf::from(file))
        .to_string_lossy()
        .to_string();

    Ok(find_stubs(&content)
        .into_iter()
        .map(|stub| StubRecord {
            path: rel_path.clone(),
            line: content[..stub.start].matches('\n').count() + 1,
            name: stub.signature.name,
            arguments: stub.signature.arguments,
            return_type: stub.signature.return_type,
        })
        .collect())
}

pub fn write_json(records: &[StubRecord], out: &mut dyn Write) -> Result<()> {
    let mut buf = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut buf, records)?;
    buf.write_all(b"\n")?;
    buf.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_stubs() {
        let text = r#"
impl Gl for Recorder {
    fn a(&self, x: u32) { unimplemented!("a"); }
    fn b(&self) { simple!(self.b()) }
    unsafe fn c(&self, p: &[u8]) -> bool { unimplemented!("c"); }
    fn d(x: u32) { unimplemented!("d"); }
    fn e(&self) {
        unimplemented!("e");
    }
}
"#;
        let stubs = find_stubs(text);
        let names: Vec<_> = stubs.iter().map(|s| s.signature.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
        assert!(text[stubs[1].start..].starts_with("unsafe fn c"));
    }

    #[test]
    fn ignores_fn_inside_identifiers() {
        assert!(find_stubs(r#"my_fn (&self) { unimplemented!("x"); }"#).is_empty());
    }

    #[test]
    fn skips_commented_and_quoted_stubs() {
        let text = r#"
// fn old(&self) { unimplemented!("x"); }
/* fn older(&self) { unimplemented!("x"); } */
const DOC: &str = "fn quoted(&self) { unimplemented!(\"q\"); }";
fn real(&self) { unimplemented!("y"); }
"#;
        let names: Vec<_> = find_stubs(text)
            .into_iter()
            .map(|s| s.signature.name)
            .collect();
        assert_eq!(names, vec!["real"]);
    }

    #[test]
    fn excludes_target_below_root_only() {
        let root = Path::new("/work/target/proj");
        assert!(!is_excluded(root, &root.join("src/lib.rs")));
        assert!(is_excluded(root, &root.join("target/debug/build.rs")));
    }

    #[test]
    fn json_records() {
        let records = vec![StubRecord {
            path: "recorder.rs".to_string(),
            line: 3,
            name: "a".to_string(),
            arguments: vec![Argument::new("x", "u32")],
            return_type: None,
        }];
        let mut out = Vec::new();
        write_json(&records, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["arguments"][0]["type_text"], "u32");
        assert!(value[0].get("return_type").is_none());
    }
}
