//! Fact catalog loading and validation.
//!
//! The catalog is a CSV file with the exact header `text,tag,md`:
//! - `text` — the fact body (rows with an empty body are dropped)
//! - `tag` — the category, used only for selection, never displayed
//! - `md` — optional anniversary date as `MM-DD`
//!
//! Catalog order is significant: it defines rotation order downstream,
//! so rows are kept exactly in file order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors from loading or validating a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSV header: expected exactly `text,tag,md`, found `{found}`")]
    BadHeader { found: String },

    #[error("row {row}: invalid anniversary date `{value}` (expected MM-DD)")]
    BadDate { row: usize, value: String },

    #[error("row {row}: unterminated quoted field")]
    UnterminatedQuote { row: usize },

    #[error("catalog has no valid rows (every row needs a non-empty body)")]
    NoValidRows,
}

/// A calendar month-day pair, used for "on this day" anniversary matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<MonthDay> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(MonthDay { month, day })
        } else {
            None
        }
    }
}

/// Error for `MonthDay` parsing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid month-day `{0}` (expected MM-DD)")]
pub struct ParseMonthDayError(String);

impl FromStr for MonthDay {
    type Err = ParseMonthDayError;

    /// Parse `MM-DD` notation, e.g. `07-16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseMonthDayError(s.to_string());
        let (m, d) = s.split_once('-').ok_or_else(bad)?;
        if m.len() != 2 || d.len() != 2 {
            return Err(bad());
        }
        let month: u32 = m.parse().map_err(|_| bad())?;
        let day: u32 = d.parse().map_err(|_| bad())?;
        MonthDay::new(month, day).ok_or_else(bad)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    /// The fact body, non-empty after trimming.
    pub body: String,

    /// Selection category; may be empty. Never displayed verbatim.
    pub category: String,

    /// When set, this fact is eligible for anniversary treatment on
    /// matching calendar dates, any year.
    pub anniversary: Option<MonthDay>,
}

const EXPECTED_HEADER: [&str; 3] = ["text", "tag", "md"];

/// Load and validate a catalog from a CSV file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Fact>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse catalog CSV content.
///
/// Validates the header, trims every field, drops rows with an empty body,
/// and fails if no valid rows remain.
pub fn parse_catalog(content: &str) -> Result<Vec<Fact>, CatalogError> {
    let records = parse_csv(content)?;

    let Some((header, rows)) = records.split_first() else {
        return Err(CatalogError::BadHeader {
            found: String::new(),
        });
    };

    let normalized: Vec<String> = header
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    if normalized != EXPECTED_HEADER {
        return Err(CatalogError::BadHeader {
            found: header.join(","),
        });
    }

    let mut facts = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let body = row.first().map(|s| s.trim()).unwrap_or("");
        if body.is_empty() {
            continue;
        }
        let category = row.get(1).map(|s| s.trim()).unwrap_or("");
        let md = row.get(2).map(|s| s.trim()).unwrap_or("");

        let anniversary = if md.is_empty() {
            None
        } else {
            Some(md.parse::<MonthDay>().map_err(|_| CatalogError::BadDate {
                row: i + 1,
                value: md.to_string(),
            })?)
        };

        facts.push(Fact {
            body: body.to_string(),
            category: category.to_string(),
            anniversary,
        });
    }

    if facts.is_empty() {
        return Err(CatalogError::NoValidRows);
    }
    Ok(facts)
}

/// Minimal CSV parser: comma-separated fields, double-quoted fields with
/// `""` escapes, quoted fields may contain commas and newlines. Handles
/// both `\n` and `\r\n` line endings.
fn parse_csv(input: &str) -> Result<Vec<Vec<String>>, CatalogError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => {
                record.push(std::mem::take(&mut field));
            }
            '\r' => {
                // Part of a \r\n line ending; bare \r is ignored
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                // Skip blank lines between records
                if record.iter().any(|f| !f.trim().is_empty()) {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CatalogError::UnterminatedQuote {
            row: records.len(),
        });
    }

    // Final record when the file does not end with a newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        if record.iter().any(|f| !f.trim().is_empty()) {
            records.push(record);
        }
    }

    Ok(records)
}
