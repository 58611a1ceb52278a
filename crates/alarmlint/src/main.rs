//! alarmlint - Check that every alarm subcode has troubleshooting docs
//!
//! alarmlint parses the firmware's alarm header for `typedef enum`
//! alarm/subcode tables and the troubleshooting markdown document for
//! `### Alarm: <code>[<range>]` headings, then reports every defined
//! subcode that no documented range covers.
//!
//! Diagnostics go to stdout in the compiler shape
//! `path:line:col: severity: message`; progress goes to stderr. The
//! process exits 0 iff every subcode is documented.

use std::collections::HashSet;
use std::path::PathBuf;

use alarmlint_core::{
    DocRanges, HeaderEnums, ReconcileOptions, Reconciliation, Severity, SubcodeCatalog,
};
use clap::Parser;
use eyre::{Result, WrapErr};
use owo_colors::OwoColorize;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "alarmlint")]
#[command(about = "Cross-checks an alarm header against its troubleshooting document")]
#[command(version)]
struct Args {
    /// Alarm header to check (e.g. ErrorHandling.h)
    #[arg(value_name = "HEADER")]
    header: PathBuf,

    /// Troubleshooting document with one section per alarm/subcode
    #[arg(value_name = "DOCS")]
    docs: PathBuf,

    /// Enum type names in the header to skip (repeatable)
    #[arg(long = "ignore", value_name = "ENUM_NAME")]
    ignore: Vec<String>,

    /// Stop at the first undocumented subcode
    #[arg(long)]
    fail_fast: bool,

    /// Disregard catch-all ("[xx]") headings when matching
    #[arg(long)]
    ignore_catch_all: bool,

    /// Warn when a subcode is documented only by a catch-all range
    #[arg(long)]
    warn_catch_all: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let header_source = std::fs::read_to_string(&args.header)
        .wrap_err_with(|| format!("Failed to read {}", args.header.display()))?;
    let doc_source = std::fs::read_to_string(&args.docs)
        .wrap_err_with(|| format!("Failed to read {}", args.docs.display()))?;

    eprintln!(
        "{} Reading alarm tables from {}...",
        "->".blue().bold(),
        args.header.display()
    );
    let ignore: HashSet<String> = args.ignore.iter().cloned().collect();
    let enums = HeaderEnums::parse(&args.header, &header_source, &ignore)?;
    let catalog = SubcodeCatalog::build(&enums)?;
    eprintln!(
        "   Found {} subcode definitions",
        catalog.len().to_string().green()
    );

    eprintln!(
        "{} Extracting documented ranges from {}...",
        "->".blue().bold(),
        args.docs.display()
    );
    let docs = DocRanges::extract(&doc_source, args.ignore_catch_all);
    eprintln!(
        "   Found {} documented ranges",
        docs.len().to_string().green()
    );
    if !docs.failures.is_empty() {
        eprintln!(
            "{} {} headings failed to parse",
            "!".yellow().bold(),
            docs.failures.len()
        );
    }

    let options = ReconcileOptions {
        fail_fast: args.fail_fast,
        warn_catch_all: args.warn_catch_all,
    };
    let result = Reconciliation::compute(&catalog, &docs, &args.docs, &options);

    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }

    if result.is_passing() {
        let warnings = result
            .diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
            .count();
        if warnings > 0 {
            eprintln!(
                "{} {} subcodes documented ({} by catch-all only)",
                "OK".green().bold(),
                result.checked,
                warnings
            );
        } else {
            eprintln!(
                "{} {} subcodes documented",
                "OK".green().bold(),
                result.checked
            );
        }
    } else {
        eprintln!(
            "{} {} of {} checked subcodes undocumented",
            "!".red().bold(),
            result.undocumented,
            result.checked
        );
        std::process::exit(1);
    }

    Ok(())
}
