use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use rust_stubgen::config::{DEFAULT_CALL_MACRO, DEFAULT_ENUM_NAME, DEFAULT_SECONDARY_FILE};
use rust_stubgen::scanner::{scan_path, write_json};
use rust_stubgen::{
    FsSecondaryFile, GeneratorConfig, Generated, MemoryFile, SecondaryFile, StubGenerator,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "rust-stubgen")]
#[command(about = "Replace unimplemented!() method stubs with delegating calls and matching enum variants")]
#[command(version)]
struct Cli {
    /// Log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Target {
    /// Source file containing the stub methods
    #[arg(short, long)]
    file: PathBuf,

    /// File holding the enum [default: call.rs next to --file]
    #[arg(long)]
    secondary: Option<PathBuf>,

    /// Macro wrapping the generated call
    #[arg(long = "macro", default_value = DEFAULT_CALL_MACRO)]
    call_macro: String,

    /// Enum that receives the new variant
    #[arg(long = "enum", default_value = DEFAULT_ENUM_NAME)]
    enum_name: String,

    /// Print the edits instead of writing any file
    #[arg(long)]
    dry_run: bool,
}

impl Target {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            call_macro: self.call_macro.clone(),
            enum_name: self.enum_name.clone(),
            secondary_file: DEFAULT_SECONDARY_FILE.to_string(),
        }
    }

    fn secondary_path(&self, config: &GeneratorConfig) -> PathBuf {
        self.secondary
            .clone()
            .unwrap_or_else(|| config.secondary_path(&self.file))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the stub that starts at the cursor
    Generate {
        #[command(flatten)]
        target: Target,

        /// Cursor as a byte offset into --file
        #[arg(long, required_unless_present = "line", conflicts_with = "line")]
        offset: Option<usize>,

        /// Cursor at the first non-blank character of this 1-based line
        #[arg(long)]
        line: Option<usize>,
    },
    /// Generate every stub in the file, top to bottom
    GenerateAll {
        #[command(flatten)]
        target: Target,
    },
    /// List stub methods in a file or directory
    Scan {
        /// File or directory to scan
        #[arg(short, long)]
        path: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            target,
            offset,
            line,
        } => generate_one(target, offset, line),
        Commands::GenerateAll { target } => generate_all(target),
        Commands::Scan { path, json } => scan(path, json),
    }
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,rust_stubgen=info".to_string(),
            2 => "info,rust_stubgen=debug".to_string(),
            _ => "debug,rust_stubgen=trace".to_string(),
        },
    };
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn generate_one(target: Target, offset: Option<usize>, line: Option<usize>) -> Result<()> {
    let config = target.config();
    let generator = StubGenerator::new(&config)?;
    let mut primary = fs::read_to_string(&target.file)
        .with_context(|| format!("Failed to read file: {}", target.file.display()))?;

    let position = match (offset, line) {
        (Some(offset), _) => offset,
        (None, Some(line)) => line_cursor(&primary, line)
            .ok_or_else(|| anyhow!("{} has no line {}", target.file.display(), line))?,
        (None, None) => return Err(anyhow!("either --offset or --line is required")),
    };

    let secondary_path = target.secondary_path(&config);
    if target.dry_run {
        let mut secondary = open_in_memory(&secondary_path)?;
        let generated = generator.generate(&mut primary, position, &mut secondary)?;
        print_generated(&generated, secondary.name());
        return Ok(());
    }

    let mut secondary = FsSecondaryFile::open(&secondary_path)
        .with_context(|| format!("Failed to read file: {}", secondary_path.display()))?;
    match generator.generate(&mut primary, position, &mut secondary) {
        Ok(generated) => {
            fs::write(&target.file, &primary)
                .with_context(|| format!("Failed to write to: {}", target.file.display()))?;
            print_generated(&generated, secondary.name());
            Ok(())
        }
        Err(e) if e.primary_edited() => Err(anyhow::Error::new(e).context(format!(
            "{} was edited in memory only and has not been saved",
            target.file.display()
        ))),
        Err(e) => Err(e.into()),
    }
}

fn generate_all(target: Target) -> Result<()> {
    let config = target.config();
    let generator = StubGenerator::new(&config)?;
    let mut primary = fs::read_to_string(&target.file)
        .with_context(|| format!("Failed to read file: {}", target.file.display()))?;
    let secondary_path = target.secondary_path(&config);

    let batch = if target.dry_run {
        let mut secondary = open_in_memory(&secondary_path)?;
        generator.generate_all(&mut primary, &mut secondary)
    } else {
        let mut secondary = FsSecondaryFile::open(&secondary_path)
            .with_context(|| format!("Failed to read file: {}", secondary_path.display()))?;
        generator.generate_all(&mut primary, &mut secondary)
    };

    let secondary_name = secondary_path.display().to_string();
    for generated in &batch.generated {
        print_generated(generated, &secondary_name);
    }
    if !target.dry_run && !batch.generated.is_empty() {
        fs::write(&target.file, &primary)
            .with_context(|| format!("Failed to write to: {}", target.file.display()))?;
    }

    println!(
        "{}",
        format!("Generated {} stub(s)", batch.generated.len()).green()
    );
    match batch.failure {
        Some(e) => Err(anyhow::Error::new(e).context("batch generation stopped")),
        None => Ok(()),
    }
}

fn scan(path: PathBuf, json: bool) -> Result<()> {
    let records = scan_path(&path)?;

    if json {
        let mut out = io::stdout().lock();
        return write_json(&records, &mut out);
    }

    if records.is_empty() {
        println!("{}", "No stub methods found.".yellow());
        return Ok(());
    }
    for record in &records {
        let args = record
            .arguments
            .iter()
            .map(|a| format!("{}: {}", a.name, a.type_text))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}:{}  {}({})",
            record.path.dimmed(),
            record.line,
            record.name.bold(),
            args
        );
    }
    println!(
        "{}",
        format!("Total stubs found: {}", records.len()).green()
    );
    Ok(())
}

fn open_in_memory(path: &Path) -> Result<MemoryFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(MemoryFile::new(path.display().to_string(), text))
}

fn print_generated(generated: &Generated, secondary: &str) {
    println!(
        "{} {}",
        "Generated".bold().green(),
        generated.signature.name.bold()
    );
    println!("  body:    {}", generated.report.call.cyan());
    println!(
        "  {}: {}",
        secondary,
        generated.report.variant.trim().cyan()
    );
}

/// Byte offset of the first non-blank character on 1-based `line`.
fn line_cursor(text: &str, line: usize) -> Option<usize> {
    let start = if line == 1 {
        0
    } else {
        text.match_indices('\n').nth(line.checked_sub(2)?)?.0 + 1
    };
    let rest = &text[start..];
    let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    Some(start + indent)
}
