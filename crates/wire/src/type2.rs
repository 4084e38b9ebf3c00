//! Decoder for layout 2, the revision with little-endian counters.
//!
//! Byte map of the 16-byte record:
//!
//! ```text
//! offset  field
//! ------  -------------------------------------------
//!  0..5   start: minute, hour, day, month, year-2000
//!  5..10  end:   minute, hour, day, month, year-2000
//! 10..12  treatment, little-endian u16
//! 12..14  leakage, little-endian u16
//! 14..16  timezone, little-endian i16
//! ```
//!
//! Month bytes are stored modulo 12 with 0 standing for December. The
//! timezone word is minutes east of UTC when it reaches a full hour in
//! either direction; smaller magnitudes are passed through as-is.

use crate::record::{device_datetime, Compliance, RECORD_LEN};

const TZ_MINUTES_THRESHOLD: i16 = 60;

/// Month byte to calendar month, folding the device's 0-11 wheel onto
/// 1-12 with 0 meaning December.
fn wrap_month(byte: u8) -> u32 {
    match u32::from(byte) % 12 {
        0 => 12,
        m => m,
    }
}

/// Decodes a layout-2 record. Returns `None` only when `bytes` is not
/// exactly [`RECORD_LEN`] long; invalid calendar fields instead produce a
/// record with nil endpoints.
pub fn decode(bytes: &[u8]) -> Option<Compliance> {
    if bytes.len() != RECORD_LEN {
        return None;
    }

    let start = device_datetime(
        2000 + i32::from(bytes[4]),
        wrap_month(bytes[3]),
        u32::from(bytes[2]),
        u32::from(bytes[1]),
        u32::from(bytes[0]),
    );
    let end = device_datetime(
        2000 + i32::from(bytes[9]),
        wrap_month(bytes[8]),
        u32::from(bytes[7]),
        u32::from(bytes[6]),
        u32::from(bytes[5]),
    );

    let treatment = u32::from(u16::from_le_bytes([bytes[10], bytes[11]]));
    let leakage = u32::from(u16::from_le_bytes([bytes[12], bytes[13]]));

    let raw = i16::from_le_bytes([bytes[14], bytes[15]]);
    let timezone = if raw >= TZ_MINUTES_THRESHOLD || raw <= -TZ_MINUTES_THRESHOLD {
        f64::from(raw) / 60.0
    } else {
        f64::from(raw)
    };

    Some(Compliance {
        start,
        end,
        treatment,
        leakage,
        timezone,
        ..Compliance::default()
    })
}
