use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gravel_config::{ConfigDiagnostics, GravelConfig};
use gravel_core::{LineCol, LineIndex, TextEdit, TextRange, TextSize};
use gravel_intentions::{convert_all, intentions_at, Document};
use gravel_syntax::debug_dump;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "gravel",
    version,
    about = "Gravel CLI (lambda-to-closure conversion, parse dumps)"
)]
struct Cli {
    /// Config file to use instead of discovering `gravel.toml` from the current directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the lambda at a position (or every lambda) into a closure
    Convert(ConvertArgs),
    /// List intentions available at a position
    Intentions(IntentionsArgs),
    /// Print a debug parse tree / errors for a single file
    Parse(ParseArgs),
}

#[derive(Args)]
struct PositionArgs {
    /// UTF-8 byte offset into the file
    #[arg(long, conflicts_with_all = ["line", "column"])]
    offset: Option<u32>,
    /// 1-based line
    #[arg(long, requires = "column")]
    line: Option<u32>,
    /// 1-based column, counted in UTF-8 bytes
    #[arg(long, requires = "line")]
    column: Option<u32>,
}

impl PositionArgs {
    fn is_set(&self) -> bool {
        self.offset.is_some() || self.line.is_some()
    }

    fn resolve(&self, text: &str) -> Result<TextSize> {
        let len = TextSize::of(text);
        if let Some(offset) = self.offset {
            let offset = TextSize::from(offset);
            if offset > len {
                bail!(
                    "offset {} is past the end of the file ({} bytes)",
                    u32::from(offset),
                    u32::from(len)
                );
            }
            return Ok(offset);
        }

        match (self.line, self.column) {
            (Some(line), Some(column)) if line > 0 && column > 0 => LineIndex::new(text)
                .offset(LineCol::new(line - 1, column - 1))
                .with_context(|| format!("position {line}:{column} is outside the file")),
            (Some(line), Some(column)) => {
                bail!("lines and columns are 1-based, got {line}:{column}")
            }
            _ => bail!("a position is required: pass --offset or --line/--column"),
        }
    }
}

#[derive(Args)]
struct ConvertArgs {
    /// Groovy file to rewrite
    file: PathBuf,
    #[command(flatten)]
    position: PositionArgs,
    /// Convert every lambda in the file
    #[arg(long, conflicts_with_all = ["offset", "line", "column"])]
    all: bool,
    /// Write the result back to the file instead of printing it
    #[arg(long)]
    write: bool,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct IntentionsArgs {
    /// Groovy file to inspect
    file: PathBuf,
    #[command(flatten)]
    position: PositionArgs,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ParseArgs {
    /// File to parse
    file: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Convert(args) => {
            let mut doc = open_document(&args.file)?;
            let edits = if !config.intentions.convert_lambda_to_closure {
                Vec::new()
            } else if args.all {
                convert_all(&mut doc)?
            } else if args.position.is_set() {
                let offset = args.position.resolve(doc.text())?;
                match intentions_at(&doc, offset).first() {
                    Some(intention) => intention.invoke(&mut doc)?.into_iter().collect(),
                    None => Vec::new(),
                }
            } else {
                bail!("nothing to convert: pass --offset, --line/--column, or --all");
            };

            if args.write && !edits.is_empty() {
                std::fs::write(&args.file, doc.text())
                    .with_context(|| format!("failed to write {}", args.file.display()))?;
            }
            tracing::info!(
                target: "gravel.cli",
                file = %args.file.display(),
                converted = edits.len(),
                written = args.write,
                "convert finished"
            );

            let exit = if edits.is_empty() { 1 } else { 0 };
            let report = ConvertReport {
                file: args.file,
                converted: edits.len(),
                edits,
                text: doc.text().to_owned(),
            };
            if args.json {
                print_json(&report)?;
            } else if !args.write {
                print!("{}", report.text);
            } else {
                println!(
                    "{}: converted {} lambda(s)",
                    report.file.display(),
                    report.converted
                );
            }
            Ok(exit)
        }
        Command::Intentions(args) => {
            let doc = open_document(&args.file)?;
            let offset = args.position.resolve(doc.text())?;
            let index = doc.line_index();
            let intentions = if config.intentions.convert_lambda_to_closure {
                intentions_at(&doc, offset)
            } else {
                Vec::new()
            };

            let entries: Vec<IntentionEntry> = intentions
                .iter()
                .map(|intention| {
                    let range = intention.target().range();
                    IntentionEntry {
                        text: intention.text(),
                        family_name: intention.family_name(),
                        range,
                        start: one_based(index.line_col(range.start())),
                        end: one_based(index.line_col(range.end())),
                        source: doc.text()[range].to_owned(),
                    }
                })
                .collect();

            if args.json {
                print_json(&entries)?;
            } else {
                for entry in &entries {
                    println!(
                        "{}:{}-{}:{}: {}",
                        entry.start.line, entry.start.col, entry.end.line, entry.end.col, entry.text
                    );
                }
            }
            Ok(0)
        }
        Command::Parse(args) => {
            let doc = open_document(&args.file)?;
            let index = doc.line_index();
            let report = ParseReport {
                tree: debug_dump(&doc.syntax()),
                errors: doc
                    .parse_errors()
                    .iter()
                    .map(|error| {
                        let start = one_based(index.line_col(error.range.start()));
                        ParseErrorEntry {
                            message: error.message.clone(),
                            line: start.line,
                            column: start.col,
                            range: error.range,
                        }
                    })
                    .collect(),
            };

            let exit = if report.errors.is_empty() { 0 } else { 1 };
            if args.json {
                print_json(&report)?;
            } else {
                print!("{}", report.tree);
                for e in &report.errors {
                    println!("error:{}:{}: {}", e.line, e.column, e.message);
                }
            }
            Ok(exit)
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<GravelConfig> {
    let (config, path, diagnostics) = match explicit {
        Some(path) => {
            let (config, diagnostics) = GravelConfig::load_from_path_with_diagnostics(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            (config, Some(path.to_path_buf()), diagnostics)
        }
        None => {
            let cwd = std::env::current_dir().context("failed to determine current directory")?;
            gravel_config::load_for_workspace_with_diagnostics(&cwd)
                .context("failed to load workspace config")?
        }
    };

    gravel_config::init_tracing(&config.logging);
    if let Some(path) = &path {
        report_config_diagnostics(path, &diagnostics);
    }
    Ok(config)
}

fn report_config_diagnostics(path: &Path, diagnostics: &ConfigDiagnostics) {
    for key in &diagnostics.unknown_keys {
        tracing::warn!(
            target: "gravel.cli",
            config = %path.display(),
            key = %key,
            "unknown config key"
        );
    }
    for warning in &diagnostics.warnings {
        tracing::warn!(target: "gravel.cli", config = %path.display(), "{warning}");
    }
}

fn open_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Document::with_path(path, text))
}

fn one_based(pos: LineCol) -> LineCol {
    LineCol::new(pos.line + 1, pos.col + 1)
}

#[derive(Serialize)]
struct ConvertReport {
    file: PathBuf,
    converted: usize,
    edits: Vec<TextEdit>,
    text: String,
}

#[derive(Serialize)]
struct IntentionEntry {
    text: &'static str,
    family_name: &'static str,
    range: TextRange,
    start: LineCol,
    end: LineCol,
    source: String,
}

#[derive(Serialize)]
struct ParseReport {
    tree: String,
    errors: Vec<ParseErrorEntry>,
}

#[derive(Serialize)]
struct ParseErrorEntry {
    message: String,
    line: u32,
    column: u32,
    range: TextRange,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
