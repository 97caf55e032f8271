//! Output formatting for filelinker

use crate::fuzzy::MatchResult;
use crate::index::IndexEntry;
use owo_colors::{OwoColorize, Stream};

/// Something that can be rendered as a table row
pub trait Tabular {
    /// Column headers for table output
    fn headers() -> Vec<&'static str>;

    /// Row values for table output
    fn row(&self) -> Vec<String>;

    /// Identifier shown by `-o name`
    fn id(&self) -> &str;
}

impl Tabular for IndexEntry {
    fn headers() -> Vec<&'static str> {
        vec!["PATH", "NAME", "KEY"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.path().to_string(),
            self.name().to_string(),
            self.key().to_string(),
        ]
    }

    fn id(&self) -> &str {
        self.path()
    }
}

impl Tabular for MatchResult {
    fn headers() -> Vec<&'static str> {
        vec!["SCORE", "PATH", "LABEL"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            colorize_score(self.score),
            self.entry.path().to_string(),
            self.entry.label().to_string(),
        ]
    }

    fn id(&self) -> &str {
        self.entry.path()
    }
}

/// Format a list of rows as a table
pub fn format_table<T: Tabular>(items: &[T]) -> String {
    if items.is_empty() {
        return "No entries found".to_string();
    }

    let rows: Vec<Vec<String>> = items.iter().map(Tabular::row).collect();
    format_table_raw(&T::headers(), &rows)
}

/// Format raw headers and rows as a table. Cells may carry color codes;
/// columns are aligned on their visible width.
pub fn format_table_raw(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| visible_width(cell))
                .fold(headers[col].chars().count(), usize::max)
        })
        .collect();

    let header = padded_line(headers.iter().copied(), &widths);
    std::iter::once(header.if_supports_color(Stream::Stdout, |h| h.bold()).to_string())
        .chain(rows.iter().map(|row| padded_line(row.iter().map(String::as_str), &widths)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join cells with two spaces of gutter, padding each to its column width
fn padded_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        let padding = width.saturating_sub(visible_width(cell));
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(padding + 2));
    }
    line.trim_end().to_string()
}

fn visible_width(cell: &str) -> usize {
    strip_ansi_codes(cell).chars().count()
}

/// Remove SGR escape sequences (`ESC [ ... m`)
pub fn strip_ansi_codes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip through the terminating 'm'
            chars.by_ref().find(|&c| c == 'm');
        } else {
            out.push(c);
        }
    }
    out
}

/// Render a score with one decimal, colored by strength
pub fn colorize_score(score: f64) -> String {
    let text = format!("{:.1}", score);
    if score >= 90.0 {
        text.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    } else if score >= 70.0 {
        text.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
    } else {
        text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    }
}

/// Format as JSON
pub fn format_json<T: serde::Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Format as YAML
pub fn format_yaml<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

/// Format as just names
pub fn format_names<T: Tabular>(items: &[T]) -> String {
    items
        .iter()
        .map(Tabular::id)
        .collect::<Vec<_>>()
        .join("\n")
}
