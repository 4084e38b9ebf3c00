//! Decoder for layout 1, the recorder's original big-endian format.
//!
//! Byte map of the 16-byte record:
//!
//! ```text
//! offset  field
//! ------  -----------------------------------------
//!  0..5   start: year-2000, month, day, hour, minute
//!  5..10  end:   year-2000, month, day, hour, minute
//! 10..15  40-bit big-endian counter word
//! 15      timezone: bit 4 sign flag, bits 0-3 magnitude in hours
//! ```
//!
//! The counter word packs both measurements: the low 20 bits are leakage
//! and the high 20 bits are treatment.

use crate::record::{device_datetime, Compliance, RECORD_LEN};

const LEAKAGE_MASK: u64 = 0x0F_FFFF;
const LEAKAGE_BITS: u32 = 20;

const TZ_SIGN_FLAG: u8 = 0x10;
const TZ_MAGNITUDE_MASK: u8 = 0x0F;

/// Decodes a layout-1 record. Returns `None` only when `bytes` is not
/// exactly [`RECORD_LEN`] long; invalid calendar fields instead produce a
/// record with nil endpoints.
pub fn decode(bytes: &[u8]) -> Option<Compliance> {
    if bytes.len() != RECORD_LEN {
        return None;
    }

    let start = device_datetime(
        2000 + i32::from(bytes[0]),
        u32::from(bytes[1]),
        u32::from(bytes[2]),
        u32::from(bytes[3]),
        u32::from(bytes[4]),
    );
    let end = device_datetime(
        2000 + i32::from(bytes[5]),
        u32::from(bytes[6]),
        u32::from(bytes[7]),
        u32::from(bytes[8]),
        u32::from(bytes[9]),
    );

    let total = u64::from(bytes[10]) << 32
        | u64::from(bytes[11]) << 24
        | u64::from(bytes[12]) << 16
        | u64::from(bytes[13]) << 8
        | u64::from(bytes[14]);
    let leakage = (total & LEAKAGE_MASK) as u32;
    let treatment = (total >> LEAKAGE_BITS) as u32;

    let magnitude = f64::from(bytes[15] & TZ_MAGNITUDE_MASK);
    let timezone = if bytes[15] & TZ_SIGN_FLAG != 0 {
        -magnitude
    } else {
        magnitude
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
