//! Upload-to-report workflows: split a quoted payload, then scan it.

mod common;

use common::jan_token;
use somnolog::detect::{analyze, ErrorKind};
use somnolog::payload::{split_tokens, token_count};
use somnolog_wire::ERASED_RECORD_B64;

#[test]
fn quoted_upload_scans_clean() {
    let nights = [
        jan_token([16, 22, 0], [16, 23, 0]),
        jan_token([17, 0, 0], [17, 1, 0]),
    ];
    let payload = format!("\"{}\"", nights.join("\",\""));

    let tokens = split_tokens(&payload, false);
    assert_eq!(tokens, nights);

    let outcome = analyze(&tokens);
    assert!(outcome.result.is_clean());
    assert_eq!(outcome.corrected_count, token_count(&payload));
}

#[test]
fn newest_first_upload_is_reversed_before_scanning() {
    // Order matters: scanned newest-first, the 7200 s gap points
    // backwards and the band never fires.
    let older = jan_token([15, 22, 0], [16, 6, 0]);
    let newer = jan_token([16, 8, 0], [16, 12, 0]);
    let payload = format!("\"{newer}\",\"{older}\"");

    let forward = analyze(&split_tokens(&payload, true));
    assert_eq!(forward.result.count(ErrorKind::MissingData), 1);

    let backward = analyze(&split_tokens(&payload, false));
    assert_eq!(backward.result.count(ErrorKind::MissingData), 0);
}

#[test]
fn escaped_upload_with_duplicates() {
    let night = jan_token([15, 22, 0], [16, 6, 0]);
    let payload = format!(r#"\"{night}\",\"{night}\""#);

    let tokens = split_tokens(&payload, false);
    assert_eq!(tokens.len(), 2);

    let outcome = analyze(&tokens);
    assert_eq!(outcome.result.count(ErrorKind::DuplicateRecord), 1);
    assert_eq!(outcome.corrected_count, 1);
}

#[test]
fn erased_slots_survive_the_splitter() {
    // The sentinel's slashes and padding must pass through splitting
    // intact, or the scanner would misread it as corruption.
    let night = jan_token([15, 22, 0], [16, 6, 0]);
    let payload = format!("\"{night}\",\"{ERASED_RECORD_B64}\"");

    let tokens = split_tokens(&payload, false);
    assert_eq!(tokens[1], ERASED_RECORD_B64);

    let outcome = analyze(&tokens);
    assert_eq!(outcome.result.count(ErrorKind::AllBytesFf), 1);
    assert_eq!(outcome.result.count(ErrorKind::DataCorrupted), 0);
}
