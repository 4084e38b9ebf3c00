//! Therapy compliance log scanning.
//!
//! Recorders upload usage history as one quoted string of base64 tokens,
//! one 16-byte record per token. This crate splits such payloads, decodes
//! them into export rows, and runs the stream defect scan that validates
//! an upload: duplicates, erased slots, corrupted tokens, nil endpoints,
//! skipped-reading gaps, and off-the-hour restarts.
//!
//! Record decoding itself lives in the `somnolog-wire` crate.

pub mod payload; // token splitting, no internal deps
pub mod detect;
pub mod report;
pub mod cli;

pub use detect::{analyze, AnalyzeResult, ErrorDetector, ErrorKind, ScanOutcome};
pub use payload::{split_tokens, token_count};
pub use report::{decode_rows, Layout, RecordRow};
