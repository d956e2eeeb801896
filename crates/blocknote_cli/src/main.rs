//! CLI entry point.
//!
//! # Responsibility
//! - Verify `blocknote_core` linkage when run without a file.
//! - Export a document JSON file as Markdown or plain text.
//!
//! # Invariants
//! - Malformed documents exit with failure; they never render as empty output.

use blocknote_core::{decode_document, to_markdown, to_plain_text, DecodeStatus};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// Export block documents as Markdown or plain text
#[derive(Parser, Debug)]
#[command(name = "blocknote_cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// Document JSON file; without it only the core linkage check runs
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// CommonMark-style export
    #[value(alias = "md")]
    Markdown,
    /// Plain-text export with aligned tables
    #[value(alias = "plain")]
    Text,
    /// Validate only and print the block count
    Check,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(path) = args.file else {
        println!("blocknote_core ping={}", blocknote_core::ping());
        println!("blocknote_core version={}", blocknote_core::core_version());
        return ExitCode::SUCCESS;
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read `{}`: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    match render(&raw, args.format) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(reason) => {
            eprintln!("`{}` is not a valid document: {reason}", path.display());
            ExitCode::FAILURE
        }
    }
}

/// Decodes `raw` and renders it in `format`; malformed input is an error.
fn render(raw: &str, format: OutputFormat) -> Result<String, String> {
    let decoded = decode_document(raw);
    if let DecodeStatus::Malformed(reason) = decoded.status {
        return Err(reason);
    }

    Ok(match format {
        OutputFormat::Markdown => to_markdown(&decoded.blocks),
        OutputFormat::Text => to_plain_text(&decoded.blocks),
        OutputFormat::Check => format!("blocks={}", decoded.blocks.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::{render, Args, OutputFormat};
    use blocknote_core::{create_block, encode_document, BlockKind};
    use clap::error::ErrorKind;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn no_arguments_runs_linkage_check() {
        let args = Args::parse_from(["blocknote_cli"]);
        assert!(args.file.is_none());
        assert_eq!(args.format, OutputFormat::Markdown);
    }

    #[test]
    fn parses_file_and_format() {
        let args = Args::parse_from(["blocknote_cli", "--format", "text", "doc.json"]);
        assert_eq!(args.file, Some(PathBuf::from("doc.json")));
        assert_eq!(args.format, OutputFormat::Text);

        let args = Args::parse_from(["blocknote_cli", "-f", "md", "doc.json"]);
        assert_eq!(args.format, OutputFormat::Markdown);
    }

    #[test]
    fn help_flag_prints_usage_instead_of_reading_a_file() {
        let err = Args::try_parse_from(["blocknote_cli", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = Args::try_parse_from(["blocknote_cli", "--format", "html", "doc.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn render_exports_and_checks_documents() {
        let raw = encode_document(&[create_block(BlockKind::Divider)]).unwrap();
        assert_eq!(render(&raw, OutputFormat::Markdown).unwrap(), "---");
        assert_eq!(render(&raw, OutputFormat::Check).unwrap(), "blocks=1");
    }

    #[test]
    fn render_rejects_malformed_documents() {
        assert!(render("{\"not\":\"an array\"}", OutputFormat::Text).is_err());
        assert_eq!(render("[]", OutputFormat::Check).unwrap(), "blocks=0");
    }
}
