//! Diagnostic commands for the matching pipeline

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::fuzzy::{similarity, NormalizerVariant};
use crate::output::{colorize_score, format_json, format_table_raw, format_yaml};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub key_a: String,
    pub key_b: String,
    pub score: f64,
}

/// Canonical keys for each name
pub fn normalize_names(names: &[String], variant: NormalizerVariant) -> Vec<Normalized> {
    names
        .iter()
        .map(|name| Normalized {
            name: name.clone(),
            key: variant.normalize(name),
        })
        .collect()
}

/// Normalize both names and score the keys
pub fn score_names(a: &str, b: &str, variant: NormalizerVariant) -> ScoreReport {
    let key_a = variant.normalize(a);
    let key_b = variant.normalize(b);
    let score = similarity(&key_a, &key_b);
    ScoreReport { key_a, key_b, score }
}

/// Execute the normalize command
pub fn run_normalize(names: &[String], variant: NormalizerVariant, output: OutputFormat) -> Result<()> {
    let rows = normalize_names(names, variant);

    let output_str = match output {
        OutputFormat::Json => format_json(&rows, true)?,
        OutputFormat::Yaml => format_yaml(&rows)?,
        OutputFormat::Name => rows
            .iter()
            .map(|r| r.key.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| vec![r.name.clone(), r.key.clone()])
                .collect();
            format_table_raw(&["NAME", "KEY"], &cells)
        }
    };
    println!("{}", output_str);
    Ok(())
}

/// Execute the score command
pub fn run_score(a: &str, b: &str, variant: NormalizerVariant, output: OutputFormat) -> Result<()> {
    let report = score_names(a, b, variant);

    let output_str = match output {
        OutputFormat::Json => format_json(&report, true)?,
        OutputFormat::Yaml => format_yaml(&report)?,
        OutputFormat::Name => format!("{:.2}", report.score),
        OutputFormat::Table => format_table_raw(
            &["KEY A", "KEY B", "SCORE"],
            &[vec![
                report.key_a.clone(),
                report.key_b.clone(),
                colorize_score(report.score),
            ]],
        ),
    };
    println!("{}", output_str);
    Ok(())
}
