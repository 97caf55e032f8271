//! Index management commands: rebuild, invalidate, status, list

use crate::cache::{CacheState, IndexStore, RebuildReport};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::fuzzy::NormalizerVariant;
use crate::linker::Linker;
use crate::output::{format_json, format_names, format_table, format_yaml};
use crate::source::{ScanIssue, SourceEnumerator};
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// Summary of the current index
#[derive(Debug, Clone, Serialize)]
pub struct IndexStatus {
    pub state: CacheState,
    pub entries: Option<usize>,
    pub built_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub normalizer: Option<NormalizerVariant>,
    pub threshold: f64,
}

#[derive(Serialize)]
struct RebuildSummary<'a> {
    entries: usize,
    source: &'a str,
    issues: &'a [ScanIssue],
}

/// Execute the rebuild command
pub fn run_rebuild<E, S>(linker: &Linker<E, S>, output: OutputFormat) -> Result<()>
where
    E: SourceEnumerator,
    S: IndexStore,
{
    let report = linker.rebuild_index()?;
    print_rebuild(&report, output)
}

fn print_rebuild(report: &RebuildReport, output: OutputFormat) -> Result<()> {
    let summary = RebuildSummary {
        entries: report.entry_count(),
        source: report.index.source(),
        issues: &report.issues,
    };

    match output {
        OutputFormat::Json => println!("{}", format_json(&summary, true)?),
        OutputFormat::Yaml => println!("{}", format_yaml(&summary)?),
        OutputFormat::Name => println!("{}", summary.entries),
        OutputFormat::Table => {
            println!(
                "Indexed {} file(s) from {}",
                summary
                    .entries
                    .if_supports_color(Stream::Stdout, |n| n.green()),
                summary.source
            );
            print_issues(&report.issues);
        }
    }
    Ok(())
}

/// Print scan issues to stderr
pub fn print_issues(issues: &[ScanIssue]) {
    for issue in issues {
        eprintln!(
            "{} {}",
            "warning:".if_supports_color(Stream::Stderr, |w| w.yellow()),
            issue
        );
    }
}

/// Execute the invalidate command
pub fn run_invalidate<E, S>(linker: &Linker<E, S>, output: OutputFormat) -> Result<()>
where
    E: SourceEnumerator,
    S: IndexStore,
{
    let cleared = linker.invalidate_index()?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::json!({ "cleared": cleared })),
        OutputFormat::Yaml => println!("cleared: {}", cleared),
        OutputFormat::Name => println!("{}", cleared),
        OutputFormat::Table => {
            if cleared {
                println!("Index cleared");
            } else {
                println!("No index to clear");
            }
        }
    }
    Ok(())
}

/// Collect the status of the linker's index without rebuilding it
pub fn index_status<E, S>(linker: &Linker<E, S>) -> Result<IndexStatus>
where
    E: SourceEnumerator,
    S: IndexStore,
{
    let index = linker.cache().current()?;
    Ok(IndexStatus {
        state: linker.cache().state(),
        entries: index.as_ref().map(|i| i.len()),
        built_at: index.as_ref().map(|i| i.built_at()),
        source: index.as_ref().map(|i| i.source().to_string()),
        normalizer: index.as_ref().map(|i| i.variant()),
        threshold: linker.threshold(),
    })
}

/// Execute the status command
pub fn run_status<E, S>(linker: &Linker<E, S>, output: OutputFormat) -> Result<()>
where
    E: SourceEnumerator,
    S: IndexStore,
{
    let status = index_status(linker)?;

    match output {
        OutputFormat::Json => println!("{}", format_json(&status, true)?),
        OutputFormat::Yaml => println!("{}", format_yaml(&status)?),
        OutputFormat::Name => match status.entries {
            Some(n) => println!("{}", n),
            None => println!("none"),
        },
        OutputFormat::Table => match status.entries {
            None => println!("No index built yet. Run 'flk rebuild'."),
            Some(entries) => {
                print_field("ENTRIES", entries);
                print_field(
                    "BUILT",
                    status.built_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                );
                print_field("SOURCE", status.source.unwrap_or_default());
                print_field(
                    "NORMALIZER",
                    status.normalizer.map(|v| v.to_string()).unwrap_or_default(),
                );
                print_field("THRESHOLD", status.threshold);
            }
        },
    }
    Ok(())
}

fn print_field(label: &str, value: impl std::fmt::Display) {
    println!(
        "{:12} {}",
        label.if_supports_color(Stream::Stdout, |l| l.bold()),
        value
    );
}

/// Execute the list command
pub fn run_list<E, S>(linker: &Linker<E, S>, output: OutputFormat) -> Result<()>
where
    E: SourceEnumerator,
    S: IndexStore,
{
    let index = linker.cache().get(false)?;
    let entries = index.entries();

    let output_str = match output {
        OutputFormat::Table => format_table(entries),
        OutputFormat::Json => format_json(entries, true)?,
        OutputFormat::Yaml => format_yaml(entries)?,
        OutputFormat::Name => format_names(entries),
    };
    println!("{}", output_str);
    Ok(())
}
