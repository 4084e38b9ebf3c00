//! The decoded compliance record and the recorder's clock conventions.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};

/// Every record occupies exactly this many bytes on the wire.
pub const RECORD_LEN: usize = 16;

/// Base64 form of a record whose sixteen bytes are all `0xFF`. The
/// recorder transmits this "erased slot" sentinel in place of a reading.
pub const ERASED_RECORD_B64: &str = "/////////////////////w==";

/// Seconds east of UTC of the recorder's wall clock. Date fields on the
/// wire are local to this fixed UTC+8 offset, whatever the user-facing
/// timezone field says.
pub const DEVICE_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// The recorder's wall-clock offset as a chrono zone.
pub fn device_offset() -> FixedOffset {
    FixedOffset::east_opt(DEVICE_UTC_OFFSET_SECS).expect("UTC+8 is in range")
}

/// Builds an instant from wall-clock fields at the recorder's offset, or
/// `None` when the fields do not name a real calendar date/time (month 13,
/// day 40, hour 99, ...). Seconds are never transmitted and are always 0.
pub fn device_datetime(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<DateTime<FixedOffset>> {
    device_offset()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
}

/// One decoded therapy-compliance sample.
///
/// `start`/`end` are `None` when the source bytes fail calendar
/// validation; the record itself still decodes. The free-text fields are
/// not carried by either wire layout and stay empty after decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compliance {
    /// Session start, if the bytes named a valid date.
    pub start: Option<DateTime<FixedOffset>>,
    /// Session end, if the bytes named a valid date.
    pub end: Option<DateTime<FixedOffset>>,
    /// Usage duration field, device units.
    pub treatment: u32,
    /// Air-leak measurement field, device units.
    pub leakage: u32,
    /// User-facing timezone: signed hours, possibly fractional (`5.75`),
    /// or a raw sub-threshold value passed through unchanged (layout 2).
    pub timezone: f64,
    pub sleep_note: String,
    pub rest_rating: String,
    pub remedies: String,
}

impl Compliance {
    /// The record's own timezone field as a chrono offset, when it denotes
    /// a representable offset from UTC. Raw pass-through values beyond
    /// ±24 h yield `None`.
    pub fn timezone_offset(&self) -> Option<FixedOffset> {
        let secs = (self.timezone * 3600.0).round();
        if !secs.is_finite() || secs.abs() >= i32::MAX as f64 {
            return None;
        }
        FixedOffset::east_opt(secs as i32)
    }
}

/// `yyyy-MM-dd HH:mm:ss` on the recorder's wall clock; empty for nil.
fn format_endpoint(endpoint: Option<DateTime<FixedOffset>>) -> String {
    match endpoint {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start: {}, End: {}, Treatment: {}, Leakage: {}, TimeZone: {}, \
             SleepNote: {}, Rest Rating: {}, Remedies: {}",
            format_endpoint(self.start),
            format_endpoint(self.end),
            self.treatment,
            self.leakage,
            self.timezone,
            self.sleep_note,
            self.rest_rating,
            self.remedies,
        )
    }
}
