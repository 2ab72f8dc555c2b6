//! Tag-length-value fields and the CRC16 trailer used by EMV QR payloads.

/// Encode a single TLV field: two-character tag, two-digit decimal length,
/// then the value.
///
/// The length counts bytes of `value`. Every field in a PromptPay payload is
/// ASCII and shorter than 100 bytes.
///
/// ```
/// use campus_merch_core::promptpay::tlv;
///
/// assert_eq!(tlv("58", "TH"), "5802TH");
/// assert_eq!(tlv("54", "100.00"), "5406100.00");
/// ```
#[must_use]
pub fn tlv(tag: &str, value: &str) -> String {
    debug_assert_eq!(tag.len(), 2, "TLV tags are two characters");
    debug_assert!(value.len() < 100, "TLV values are at most 99 bytes");
    format!("{tag}{:02}{value}", value.len())
}

/// CRC-16/CCITT-FALSE over the UTF-16 code units of `input`, as four
/// uppercase hex digits.
///
/// Register starts at `0xFFFF`; each code unit is XORed into the high byte
/// and followed by eight shift rounds with polynomial `0x1021`. Bits of a
/// code unit above the low byte fall off the top of the 16-bit register.
///
/// ```
/// use campus_merch_core::promptpay::crc16;
///
/// assert_eq!(crc16("123456789"), "29B1");
/// assert_eq!(crc16(""), "FFFF");
/// ```
#[must_use]
pub fn crc16(input: &str) -> String {
    const POLY: u16 = 0x1021;

    let mut crc: u16 = 0xFFFF;
    for unit in input.encode_utf16() {
        crc ^= unit << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 == 0 {
                crc << 1
            } else {
                (crc << 1) ^ POLY
            };
        }
    }
    format!("{crc:04X}")
}
