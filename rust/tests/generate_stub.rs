use rust_stubgen::{
    FsSecondaryFile, GenerateError, GeneratorConfig, ParseError, RewriteError, SecondaryFile,
    SourceBuffer, Stage, StubGenerator,
};
use std::fs;
use std::path::{Path, PathBuf};

const RECORDER: &str = include_str!("fixtures/recorder.rs");
const CALL: &str = include_str!("fixtures/call.rs");

fn project(primary: &str, secondary: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let primary_path = dir.path().join("recorder.rs");
    let secondary_path = GeneratorConfig::default().secondary_path(&primary_path);
    fs::write(&primary_path, primary).unwrap();
    fs::write(&secondary_path, secondary).unwrap();
    (dir, primary_path, secondary_path)
}

fn generator() -> StubGenerator {
    StubGenerator::new(&GeneratorConfig::default()).unwrap()
}

/// `(variant, [field names])` of `pub enum Call` in `path`.
fn call_variants(path: &Path) -> Vec<(String, Vec<String>)> {
    let file = syn::parse_file(&fs::read_to_string(path).unwrap()).expect("call.rs should parse");
    let item = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Enum(e) if e.ident == "Call" => Some(e),
            _ => None,
        })
        .expect("Call enum should exist");
    item.variants
        .iter()
        .map(|v| {
            let fields = v
                .fields
                .iter()
                .map(|f| f.ident.as_ref().unwrap().to_string())
                .collect();
            (v.ident.to_string(), fields)
        })
        .collect()
}

#[test]
fn compute_end_to_end() {
    let primary = "impl Shapes for Recorder {\n    fn compute(&self, width: u32, label: &str) { unimplemented!(\"todo\"); }\n}\n";
    let (_dir, primary_path, secondary_path) = project(primary, CALL);

    let mut buffer = fs::read_to_string(&primary_path).unwrap();
    let mut secondary = FsSecondaryFile::open(&secondary_path).unwrap();
    let position = buffer.find("fn compute").unwrap();
    generator()
        .generate(&mut buffer, position, &mut secondary)
        .unwrap();

    assert_eq!(
        buffer,
        "impl Shapes for Recorder {\n    fn compute(&self, width: u32, label: &str) { simple!(self.compute(width, label)) }\n}\n"
    );
    let saved = fs::read_to_string(&secondary_path).unwrap();
    assert!(saved.contains(
        "pub enum Call {\n    clear { mask: u32 },\n    compute { width: u32, label: &str },\n}\n"
    ));
    assert_eq!(
        call_variants(&secondary_path),
        vec![
            ("clear".to_string(), vec!["mask".to_string()]),
            (
                "compute".to_string(),
                vec!["width".to_string(), "label".to_string()]
            ),
        ]
    );
}

#[test]
fn multiline_stub_keeps_types_verbatim() {
    let (_dir, primary_path, secondary_path) = project(RECORDER, CALL);

    let mut buffer = fs::read_to_string(&primary_path).unwrap();
    let mut secondary = FsSecondaryFile::open(&secondary_path).unwrap();
    let position = buffer.find("fn upload").unwrap();
    let generated = generator()
        .generate(&mut buffer, position, &mut secondary)
        .unwrap();

    assert_eq!(generated.report.call, "simple!(self.upload(slot, pixels, scratch))");
    assert!(buffer.contains("    ) {\n        simple!(self.upload(slot, pixels, scratch))\n    }"));
    let saved = fs::read_to_string(&secondary_path).unwrap();
    assert!(saved.contains("    upload { slot: u32, pixels: &[u8], scratch: &mut Vec<u8> },\n}"));
}

#[test]
fn generate_all_fixture() {
    let (_dir, primary_path, secondary_path) = project(RECORDER, CALL);

    let mut buffer = fs::read_to_string(&primary_path).unwrap();
    let mut secondary = FsSecondaryFile::open(&secondary_path).unwrap();
    let batch = generator().generate_all(&mut buffer, &mut secondary);

    assert!(batch.failure.is_none());
    assert_eq!(batch.generated.len(), 3);
    assert!(!buffer.contains("unimplemented!"));
    assert!(buffer.contains("simple!(self.draw_rect(x, y, width, height))"));
    assert!(buffer.contains("simple!(self.flush())"));
    syn::parse_file(&buffer).expect("rewritten recorder should parse");

    let names: Vec<_> = call_variants(&secondary_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["clear", "draw_rect", "upload", "flush"]);
    assert!(fs::read_to_string(&secondary_path)
        .unwrap()
        .contains("    flush {  },\n"));
}

#[test]
fn rejected_declarations_leave_both_files_alone() {
    let primary = "fn compute(width: u32) { unimplemented!(\"todo\"); }\nfn later(&self, n: u8) { todo!() }\n";
    let (_dir, primary_path, secondary_path) = project(primary, CALL);
    let generator = generator();

    let mut buffer = fs::read_to_string(&primary_path).unwrap();
    let mut secondary = FsSecondaryFile::open(&secondary_path).unwrap();

    let err = generator
        .generate(&mut buffer, 0, &mut secondary)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Parse(ParseError::NotAFunctionHeader { .. })));

    let position = buffer.find("fn later").unwrap();
    let err = generator
        .generate(&mut buffer, position, &mut secondary)
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Parse(ParseError::UnexpectedBody { ref function, .. }) if function == "later"
    ));

    assert_eq!(buffer, primary);
    assert_eq!(secondary.text(), CALL);
    assert_eq!(fs::read_to_string(&secondary_path).unwrap(), CALL);
}

#[test]
fn missing_enum_is_not_rolled_back() {
    let (_dir, primary_path, secondary_path) = project(RECORDER, "pub struct Call;\n");

    let mut buffer = fs::read_to_string(&primary_path).unwrap();
    let mut secondary = FsSecondaryFile::open(&secondary_path).unwrap();
    let position = buffer.find("fn flush").unwrap();
    let err = generator()
        .generate(&mut buffer, position, &mut secondary)
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Rewrite(RewriteError::EnumTargetNotFound { .. })
    ));
    assert_eq!(err.stage(), Stage::PrimaryEdited);
    assert!(err.primary_edited());
    assert!(buffer.contains("simple!(self.flush())"));
    assert_eq!(fs::read_to_string(&primary_path).unwrap(), RECORDER);
    assert_eq!(
        fs::read_to_string(&secondary_path).unwrap(),
        "pub struct Call;\n"
    );
    assert_eq!(secondary.name(), secondary_path.display().to_string());
}
