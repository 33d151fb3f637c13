use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use urqjump::config::Settings;
use urqjump::document::{ScriptDocument, Span};
use urqjump::index;
use urqjump::jump::{jump, Jump};
use urqjump::status;

#[derive(Parser)]
#[command(name = "urqjump", about = "Jump to or create URQ quest locations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the reference at a cursor offset; print the jump target
    /// or the planned location block
    Jump {
        file: PathBuf,
        /// Cursor position as a char offset into the file
        #[arg(long)]
        offset: usize,
        /// Active selection as char offsets, e.g. 10..24
        #[arg(long)]
        selection: Option<String>,
        /// Apply a creation edit to the file instead of only printing it
        #[arg(long)]
        write: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every location header in the file
    Locs { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Jump {
            file,
            offset,
            selection,
            write,
            json,
        } => cmd_jump(&file, offset, selection.as_deref(), write, json),
        Commands::Locs { file } => cmd_locs(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// JSON shape of a jump invocation's outcome.
#[derive(Serialize)]
struct JumpReport {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Jump>,
}

fn cmd_jump(
    file: &Path,
    offset: usize,
    selection: Option<&str>,
    write: bool,
    json: bool,
) -> anyhow::Result<()> {
    let root = file.parent().unwrap_or_else(|| Path::new("."));
    let settings = Settings::new(root)?;
    if !settings.supports_path(file) {
        bail!("unsupported file type: {}", file.display());
    }

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let doc = ScriptDocument::new(&text);
    if offset > doc.len_chars() {
        bail!(
            "offset {offset} past end of document ({} chars)",
            doc.len_chars()
        );
    }
    let selection = selection.map(parse_span).transpose()?;

    let outcome = jump(&doc, offset, selection, &settings);
    let status_line = |message: &str| {
        if settings.status_location_count {
            status::with_location_count(message, &doc)
        } else {
            message.to_string()
        }
    };

    // a failed resolution is a status, not a process error
    let done = match outcome {
        Err(e) => {
            let report = JumpReport {
                status: status_line(&e.to_string()),
                outcome: None,
            };
            return print_report(&report, json);
        }
        Ok(done) => done,
    };

    let report = JumpReport {
        status: status_line(&done.status_message()),
        outcome: Some(done.clone()),
    };
    print_report(&report, json)?;

    match done {
        Jump::Existing { target, .. } => {
            if !json {
                let (line, col) = doc.line_col(target);
                println!("{}:{line}:{col}", file.display());
            }
        }
        Jump::Created { edit, .. } => {
            if write {
                let mut updated = text.clone();
                updated.insert_str(doc.char_to_byte(edit.offset), &edit.text);
                std::fs::write(file, &updated)
                    .with_context(|| format!("writing {}", file.display()))?;
                if !json {
                    let (line, col) = ScriptDocument::new(&updated).line_col(edit.cursor);
                    println!("{}:{line}:{col}", file.display());
                }
            } else if !json {
                let (line, col) = doc.line_col(edit.offset);
                println!("would insert at {}:{line}:{col}", file.display());
            }
        }
    }

    Ok(())
}

fn cmd_locs(file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let doc = ScriptDocument::new(&text);

    for entry in index::locations(&doc) {
        let (line, col) = doc.line_col(entry.position);
        println!("{line}:{col}\t{}", entry.name);
    }

    Ok(())
}

fn print_report(report: &JumpReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.status);
    }
    Ok(())
}

/// Parse a `start..end` char range.
fn parse_span(raw: &str) -> anyhow::Result<Span> {
    let Some((start, end)) = raw.split_once("..") else {
        bail!("selection must look like START..END, got `{raw}`");
    };
    let start: usize = start.trim().parse().context("selection start")?;
    let end: usize = end.trim().parse().context("selection end")?;
    if end < start {
        bail!("selection end before start: {raw}");
    }
    Ok(Span::new(start, end))
}
