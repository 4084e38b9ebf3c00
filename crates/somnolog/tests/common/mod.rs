#![allow(dead_code)]

use somnolog_wire::to_base64;

/// Layout-1 record bytes from raw field groups.
pub fn type1_bytes(start: [u8; 5], end: [u8; 5], counters: [u8; 5], tz: u8) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes[..5].copy_from_slice(&start);
    bytes[5..10].copy_from_slice(&end);
    bytes[10..15].copy_from_slice(&counters);
    bytes[15] = tz;
    bytes
}

/// Layout-1 token with zero counters and a UTC+8 timezone byte.
pub fn type1_token(start: [u8; 5], end: [u8; 5]) -> String {
    to_base64(&type1_bytes(start, end, [0; 5], 0x08))
}

/// January 2013 layout-1 token, endpoint fields `[day, hour, minute]`.
pub fn jan_token(start: [u8; 3], end: [u8; 3]) -> String {
    type1_token(
        [13, 1, start[0], start[1], start[2]],
        [13, 1, end[0], end[1], end[2]],
    )
}

/// Token whose start is valid but whose end month is not (nil end).
pub fn nil_end_token(start: [u8; 3]) -> String {
    type1_token([13, 1, start[0], start[1], start[2]], [13, 13, 1, 0, 0])
}

/// Token whose end is valid but whose start month is not (nil start).
pub fn nil_start_token(end: [u8; 3]) -> String {
    type1_token([13, 13, 1, 0, 0], [13, 1, end[0], end[1], end[2]])
}

/// Token with both endpoints invalid. `salt` varies the counter bytes so
/// repeated calls do not collide as duplicates.
pub fn nil_both_token(salt: u8) -> String {
    to_base64(&type1_bytes(
        [13, 13, 1, 0, 0],
        [13, 13, 1, 0, 0],
        [0, 0, 0, 0, salt],
        0x08,
    ))
}
