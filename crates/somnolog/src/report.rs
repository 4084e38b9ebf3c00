//! Display rows for decoded uploads.
//!
//! Turns base64 tokens into rows ready for export: endpoint timestamps
//! rendered at a caller-chosen viewing offset, counters, and the source
//! token. The serialized field names are the historical export keys.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use somnolog_wire::{from_base64, type1, type2, Compliance};

/// Which of the two 16-byte layouts a payload uses. The byte stream
/// carries no tag, so the caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Type1,
    Type2,
}

impl Layout {
    fn decode(self, bytes: &[u8]) -> Option<Compliance> {
        match self {
            Layout::Type1 => type1::decode(bytes),
            Layout::Type2 => type2::decode(bytes),
        }
    }
}

/// Placeholder text for tokens that do not decode to a record.
const RECORD_NULL: &str = "Record NULL";

/// One export row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    /// `yyyy-MM-dd HH:mm:ss` at the viewing offset; empty for a nil start.
    #[serde(rename = "startTimeString")]
    pub start_time: String,
    #[serde(rename = "endTimeString")]
    pub end_time: String,
    #[serde(rename = "treatmentVal")]
    pub treatment: u32,
    #[serde(rename = "leakageVal")]
    pub leakage: u32,
    /// The base64 token the row was decoded from.
    #[serde(rename = "item")]
    pub token: String,
}

fn format_at(offset: FixedOffset, endpoint: Option<DateTime<FixedOffset>>) -> String {
    match endpoint {
        Some(t) => t
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => String::new(),
    }
}

/// Decodes each token into an export row, timestamps rendered at
/// `display_offset`. Tokens that fail transport decoding or the record
/// length check yield a placeholder row with zero counters.
pub fn decode_rows<I, S>(tokens: I, layout: Layout, display_offset: FixedOffset) -> Vec<RecordRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| {
            let token = token.as_ref();
            let decoded = from_base64(token)
                .ok()
                .and_then(|bytes| layout.decode(&bytes));
            match decoded {
                Some(sample) => RecordRow {
                    start_time: format_at(display_offset, sample.start),
                    end_time: format_at(display_offset, sample.end),
                    treatment: sample.treatment,
                    leakage: sample.leakage,
                    token: token.to_owned(),
                },
                None => RecordRow {
                    start_time: RECORD_NULL.to_owned(),
                    end_time: RECORD_NULL.to_owned(),
                    treatment: 0,
                    leakage: 0,
                    token: token.to_owned(),
                },
            }
        })
        .collect()
}
