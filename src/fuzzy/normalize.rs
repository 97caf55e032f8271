//! Canonical keys for file names and queries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character placed between words by the slug variant
pub const SEPARATOR: char = '-';

/// Characters the strip variant deletes
const STRIPPED: [char; 3] = ['-', '_', ' '];

/// How raw names are folded into keys.
///
/// One variant is chosen per process and recorded in every index built with
/// it; keys produced by different variants are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerVariant {
    /// `"BlueBerry Kush.pdf"` -> `"blue-berry-kush"`
    #[default]
    Slug,
    /// `"My File_1.pdf"` -> `"myfile1"`
    Strip,
}

impl NormalizerVariant {
    /// Normalize a raw name with this variant
    pub fn normalize(self, raw: &str) -> String {
        match self {
            NormalizerVariant::Slug => slug(raw),
            NormalizerVariant::Strip => strip(raw),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NormalizerVariant::Slug => "slug",
            NormalizerVariant::Strip => "strip",
        }
    }
}

impl fmt::Display for NormalizerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizerVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slug" => Ok(NormalizerVariant::Slug),
            "strip" => Ok(NormalizerVariant::Strip),
            other => Err(format!("unknown normalizer variant '{}'", other)),
        }
    }
}

/// Normalize with the default (slug) variant
pub fn normalize(raw: &str) -> String {
    NormalizerVariant::default().normalize(raw)
}

/// Drop the extension, split camel case, lowercase, then join the
/// alphanumeric runs with [`SEPARATOR`].
fn slug(raw: &str) -> String {
    // Camel splitting never adds a dot, so only the extension itself is
    // affected by doing this first: `"Report.PdF"` loses `.PdF` whole.
    let spaced = split_camel_case(strip_extension(raw));
    let stem = spaced.to_ascii_lowercase();

    let mut key = String::with_capacity(stem.len());
    let mut pending_separator = false;
    for c in stem.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            // Separators are only emitted between runs, which also trims both ends
            if pending_separator && !key.is_empty() {
                key.push(SEPARATOR);
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }
    key
}

/// Lowercase, drop the extension, then delete dashes, underscores and spaces
fn strip(raw: &str) -> String {
    let lowered = raw.to_ascii_lowercase();
    strip_extension(&lowered)
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect()
}

/// Insert a space wherever a lowercase ASCII letter is followed by an uppercase one
fn split_camel_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c);
    }
    out
}

/// Remove a trailing `.ext` where `ext` is a non-empty run of ASCII
/// alphanumerics. A dot followed by anything else (`"3.5 gram"`) is part of
/// the name.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
                &name[..dot]
            } else {
                name
            }
        }
        None => name,
    }
}
