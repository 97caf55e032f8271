//! Resolve command implementation

use crate::cache::IndexStore;
use crate::cli::{OutputFormat, ResolveArgs};
use crate::error::Result;
use crate::fuzzy::MatchResult;
use crate::linker::Linker;
use crate::output::{format_json, format_names, format_table, format_yaml};
use crate::source::SourceEnumerator;

use super::index::print_issues;

/// Execute the resolve command
pub fn run_resolve<E, S>(linker: &Linker<E, S>, args: &ResolveArgs, output: OutputFormat) -> Result<()>
where
    E: SourceEnumerator,
    S: IndexStore,
{
    if args.refresh {
        let report = linker.rebuild_index()?;
        print_issues(&report.issues);
    }

    let result = if args.contains {
        linker.find_containing(&args.query)?
    } else {
        let threshold = args.threshold.unwrap_or_else(|| linker.threshold());
        linker.resolve_with(&args.query, threshold)?
    };

    let rendered = render_match(&args.query, result.as_ref(), output)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

/// Render a resolution outcome; no match renders as a message or `null`
pub fn render_match(query: &str, result: Option<&MatchResult>, output: OutputFormat) -> Result<String> {
    let rows: Vec<MatchResult> = result.into_iter().cloned().collect();

    Ok(match output {
        OutputFormat::Table if rows.is_empty() => {
            format!("No matching file found for '{}'", query)
        }
        OutputFormat::Table => format_table(&rows),
        OutputFormat::Json => format_json(&result, true)?,
        OutputFormat::Yaml => format_yaml(&result)?,
        OutputFormat::Name => format_names(&rows),
    })
}
