//! Protocol name and level header

/// Protocol name written at the start of every `CONNECT` variable header
pub const PROTOCOL_NAME: &[u8] = b"MQTT";

/// Protocol level in MQTT (`0x04` in v3.1.1)
pub const SPEC_3_1_1: u8 = 0x04;
