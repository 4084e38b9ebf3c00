//! Core logic for the command-line entry points:
//! - `somnolog-scan` scans a quoted payload for stream defects
//! - `somnolog-dump` decodes a quoted payload to export rows

use chrono::FixedOffset;
use serde_json::json;

use crate::detect::analyze;
use crate::payload::split_tokens;
use crate::report::{decode_rows, Layout};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    UnknownLayout(String),
    InvalidOffset(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e) => write!(f, "{e}"),
            CliError::UnknownLayout(e) => write!(f, "Unknown layout: {e}"),
            CliError::InvalidOffset(e) => write!(f, "Invalid offset: {e}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

// ── somnolog-scan ─────────────────────────────────────────────────────────

/// Scan a raw payload and render the defect report as pretty JSON.
///
/// `newest_first` marks payloads uploaded newest-first; they are
/// reversed into scan order before detection.
pub fn scan_report(payload: &str, newest_first: bool) -> Result<String, CliError> {
    let tokens = split_tokens(payload, newest_first);
    let outcome = analyze(&tokens);
    let report = json!({
        "correctedCount": outcome.corrected_count,
        "errors": outcome.result,
        "isClean": outcome.result.is_clean(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

// ── somnolog-dump ─────────────────────────────────────────────────────────

/// Decode a raw payload to export rows as pretty JSON.
///
/// `format` picks the record layout (`"type1"` or `"type2"`);
/// `offset_hours` is the viewing offset in signed hours east of UTC.
pub fn dump_rows(
    payload: &str,
    newest_first: bool,
    format: &str,
    offset_hours: f64,
) -> Result<String, CliError> {
    let layout = parse_layout(format)?;
    let offset = display_offset(offset_hours)?;
    let tokens = split_tokens(payload, newest_first);
    let rows = decode_rows(&tokens, layout, offset);
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Layout selector for the `--format` flag.
pub fn parse_layout(format: &str) -> Result<Layout, CliError> {
    match format.to_lowercase().as_str() {
        "type1" | "1" => Ok(Layout::Type1),
        "type2" | "2" => Ok(Layout::Type2),
        other => Err(CliError::UnknownLayout(other.to_string())),
    }
}

/// Viewing offset for the `--tz` flag, in signed hours east of UTC.
pub fn display_offset(hours: f64) -> Result<FixedOffset, CliError> {
    let secs = (hours * 3600.0).round();
    if !secs.is_finite() || secs.abs() >= 86_400.0 {
        return Err(CliError::InvalidOffset(hours.to_string()));
    }
    FixedOffset::east_opt(secs as i32).ok_or_else(|| CliError::InvalidOffset(hours.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────
