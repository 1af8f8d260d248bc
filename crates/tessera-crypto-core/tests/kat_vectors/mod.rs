mod codename;
mod password;
mod seed;

/// 37-byte normalized assertion shared by all vectors:
/// rpIdHash = 00..1f, flags = 0x05, signCount = 0.
pub const FIXTURE_A: [u8; 37] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f, 0x05, 0x00, 0x00, 0x00, 0x00,
];

/// Decode a lowercase hex string; test helper only.
pub fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}
