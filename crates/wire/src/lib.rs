//! Wire-format layer for 16-byte therapy compliance records.
//!
//! Recorders upload usage history as base64 strings, one record per
//! string. This crate owns the transport alphabet ([`from_base64`],
//! [`to_base64`]) and the two generations of record layout
//! ([`type1::decode`], [`type2::decode`]), both of which produce the
//! shared [`Compliance`] struct.
//!
//! Decoding is total over 16-byte inputs: malformed calendar fields nil
//! the affected endpoint rather than failing the record, so stream-level
//! checks can reason about partial data.
//!
//! # Example
//!
//! ```
//! use somnolog_wire::{from_base64, to_base64, type1};
//!
//! let bytes = [13, 1, 15, 22, 0, 13, 1, 15, 23, 0, 0, 0, 0, 0, 42, 0x19];
//! let token = to_base64(&bytes);
//! let record = type1::decode(&from_base64(&token).unwrap()).unwrap();
//!
//! assert_eq!(record.start.unwrap().to_rfc3339(), "2013-01-15T22:00:00+08:00");
//! assert_eq!(record.end.unwrap().to_rfc3339(), "2013-01-15T23:00:00+08:00");
//! assert_eq!(record.treatment, 0);
//! assert_eq!(record.leakage, 42);
//! assert_eq!(record.timezone, -9.0);
//! ```

pub mod base64;
pub mod record;
pub mod type1;
pub mod type2;

pub use base64::{from_base64, to_base64, Base64Error};
pub use record::{
    device_datetime, device_offset, Compliance, DEVICE_UTC_OFFSET_SECS, ERASED_RECORD_B64,
    RECORD_LEN,
};
