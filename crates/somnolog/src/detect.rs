//! Stream defect detection over ordered base64 record strings.
//!
//! The scanner walks an upload oldest-first and folds each token into a
//! defect histogram: exact duplicates, erased-slot sentinels, corrupted
//! transport strings, records with nil endpoints, skipped-reading gaps,
//! and off-the-hour restarts on an already-anchored day. No defect stops
//! the scan; every token is classified and counted.
//!
//! Detection state (seen tokens, seen days, last paired end time) lives
//! in an [`ErrorDetector`] and carries across `scan` calls on the same
//! detector. One-shot callers use [`analyze`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{Datelike, Timelike};
use serde::Serialize;
use somnolog_wire::{from_base64, type1, ERASED_RECORD_B64};

/// Shortest start-to-previous-end gap flagged as a skipped reading.
pub const MISSING_DATA_MIN_GAP_SECS: i64 = 5400;

/// Gaps at or beyond this bound count as a deliberate device-off period
/// rather than a skipped reading.
pub const MISSING_DATA_MAX_GAP_SECS: i64 = 14400;

/// One kind of stream defect.
///
/// The serialized names are the historical camelCase tags consumed by
/// existing dashboards; [`ErrorKind::as_str`] yields the same strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The exact token was already seen by this detector.
    DuplicateRecord,
    /// The reserved all-0xFF erased-slot sentinel.
    #[serde(rename = "allBytesFF")]
    AllBytesFf,
    /// Neither endpoint survived calendar validation.
    BothTimesNil,
    /// Start endpoint missing, end present.
    StartTimeNil,
    /// End endpoint missing, start present.
    EndTimeNil,
    /// The token did not decode to a 16-byte record.
    DataCorrupted,
    /// Start-to-previous-end gap inside the skipped-reading band.
    MissingData,
    /// Off-the-hour start on a day already anchored by an earlier record.
    StartTimeChanged,
}

impl ErrorKind {
    /// Historical camelCase tag, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DuplicateRecord => "duplicateRecord",
            ErrorKind::AllBytesFf => "allBytesFF",
            ErrorKind::BothTimesNil => "bothTimesNil",
            ErrorKind::StartTimeNil => "startTimeNil",
            ErrorKind::EndTimeNil => "endTimeNil",
            ErrorKind::DataCorrupted => "dataCorrupted",
            ErrorKind::MissingData => "missingData",
            ErrorKind::StartTimeChanged => "startTimeChanged",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind defect counts for one scan.
///
/// Only kinds that occurred are present; a clean scan serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalyzeResult {
    counts: BTreeMap<ErrorKind, u32>,
}

impl AnalyzeResult {
    fn tally(&mut self, kind: ErrorKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Occurrences of one kind; absent kinds count 0.
    pub fn count(&self, kind: ErrorKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Defects of all kinds combined.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// True when no defect of any kind was counted.
    pub fn is_clean(&self) -> bool {
        self.counts.values().all(|&n| n == 0)
    }

    /// Kinds that occurred, in declaration order, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, u32)> + '_ {
        self.counts.iter().map(|(&kind, &count)| (kind, count))
    }
}

/// Outcome of one scan call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Tokens scanned minus duplicates.
    pub corrected_count: usize,
    /// This scan's defect histogram.
    pub result: AnalyzeResult,
}

/// Sequential scanner over ordered base64 record strings.
///
/// State persists across `scan` calls, so a token from an earlier scan
/// still counts as a duplicate later. Two scans must not share a
/// detector concurrently; construct one per stream instead.
#[derive(Debug, Default)]
pub struct ErrorDetector {
    seen_records: HashSet<String>,
    seen_days: HashSet<String>,
    last_end_ts: Option<i64>,
}

impl ErrorDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `records` in the given order and returns this scan's
    /// histogram. Callers holding newest-first uploads reverse them
    /// before calling.
    pub fn scan<I, S>(&mut self, records: I) -> ScanOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = AnalyzeResult::default();
        let mut scanned = 0usize;

        for record in records {
            let record = record.as_ref();
            scanned += 1;

            // Every token joins the seen set, defective or not.
            if !self.seen_records.insert(record.to_owned()) {
                result.tally(ErrorKind::DuplicateRecord);
                continue;
            }
            if record == ERASED_RECORD_B64 {
                result.tally(ErrorKind::AllBytesFf);
                continue;
            }

            let decoded = from_base64(record)
                .ok()
                .and_then(|bytes| type1::decode(&bytes));
            let Some(sample) = decoded else {
                result.tally(ErrorKind::DataCorrupted);
                continue;
            };

            match (sample.start, sample.end) {
                (None, None) => result.tally(ErrorKind::BothTimesNil),
                (None, Some(_)) => result.tally(ErrorKind::StartTimeNil),
                (Some(_), None) => result.tally(ErrorKind::EndTimeNil),
                (Some(start), Some(end)) => {
                    if let Some(last_end) = self.last_end_ts {
                        let gap = start.timestamp() - last_end;
                        if (MISSING_DATA_MIN_GAP_SECS..MISSING_DATA_MAX_GAP_SECS).contains(&gap) {
                            result.tally(ErrorKind::MissingData);
                        }
                    }

                    // Day key on the recorder's wall clock, month zero-based.
                    let day_key = format!("{}/{}/{}", start.year(), start.month0(), start.day());
                    let first_of_day = self.seen_days.insert(day_key);
                    if !first_of_day && (start.minute() != 0 || start.second() != 0) {
                        result.tally(ErrorKind::StartTimeChanged);
                    }

                    self.last_end_ts = Some(end.timestamp());
                }
            }
        }

        let duplicates = result.count(ErrorKind::DuplicateRecord) as usize;
        ScanOutcome {
            corrected_count: scanned - duplicates,
            result,
        }
    }
}

/// One-shot scan with a fresh detector.
///
/// # Example
///
/// ```
/// use somnolog::detect::{analyze, ErrorKind};
/// use somnolog_wire::to_base64;
///
/// let night = to_base64(&[13, 1, 15, 22, 0, 13, 1, 16, 6, 0, 0, 0, 0x50, 0, 0x03, 0x08]);
/// let outcome = analyze([night.as_str(), night.as_str()]);
///
/// assert_eq!(outcome.corrected_count, 1);
/// assert_eq!(outcome.result.count(ErrorKind::DuplicateRecord), 1);
/// assert!(!outcome.result.is_clean());
/// ```
pub fn analyze<I, S>(records: I) -> ScanOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ErrorDetector::new().scan(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serialized_tag() {
        let kinds = [
            ErrorKind::DuplicateRecord,
            ErrorKind::AllBytesFf,
            ErrorKind::BothTimesNil,
            ErrorKind::StartTimeNil,
            ErrorKind::EndTimeNil,
            ErrorKind::DataCorrupted,
            ErrorKind::MissingData,
            ErrorKind::StartTimeChanged,
        ];
        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn sentinel_tag_keeps_upper_ff() {
        assert_eq!(ErrorKind::AllBytesFf.as_str(), "allBytesFF");
    }

    #[test]
    fn empty_result_is_clean() {
        let result = AnalyzeResult::default();
        assert!(result.is_clean());
        assert_eq!(result.total(), 0);
        assert_eq!(result.count(ErrorKind::MissingData), 0);
        assert_eq!(serde_json::to_string(&result).unwrap(), "{}");
    }

    #[test]
    fn tally_accumulates_per_kind() {
        let mut result = AnalyzeResult::default();
        result.tally(ErrorKind::MissingData);
        result.tally(ErrorKind::MissingData);
        result.tally(ErrorKind::DuplicateRecord);

        assert_eq!(result.count(ErrorKind::MissingData), 2);
        assert_eq!(result.count(ErrorKind::DuplicateRecord), 1);
        assert_eq!(result.total(), 3);
        assert!(!result.is_clean());
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"duplicateRecord":1,"missingData":2}"#
        );
    }

    #[test]
    fn iter_yields_only_counted_kinds() {
        let mut result = AnalyzeResult::default();
        result.tally(ErrorKind::DataCorrupted);
        result.tally(ErrorKind::AllBytesFf);

        let kinds: Vec<(ErrorKind, u32)> = result.iter().collect();
        assert_eq!(
            kinds,
            vec![(ErrorKind::AllBytesFf, 1), (ErrorKind::DataCorrupted, 1)]
        );
    }

    #[test]
    fn empty_scan_is_clean_with_zero_corrected() {
        let outcome = analyze(Vec::<String>::new());
        assert_eq!(outcome.corrected_count, 0);
        assert!(outcome.result.is_clean());
    }
}
