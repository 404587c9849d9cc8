/// renders bytes as contiguous upper case hex pairs, like "8B4600"
pub fn hex_bytes(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect()
}

/// renders a single byte as a prefixed, unpadded, lower case hex value, like "0x9" or "0xf4"
pub fn hex_byte(b: u8) -> String {
    format!("{:#x}", b)
}

#[test]
fn can_format_hex() {
    assert_eq!("", hex_bytes(&[]));
    assert_eq!("8B4600", hex_bytes(&[0x8B, 0x46, 0x00]));
    assert_eq!("0x0", hex_byte(0x00));
    assert_eq!("0x9", hex_byte(0x09));
    assert_eq!("0xf4", hex_byte(0xF4));
}
