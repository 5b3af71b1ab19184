//! SUBACK

use std::fmt::Display;

use crate::{
    common::{Decodable, PacketIdentifier, QualityOfService},
    v4::packet::DecodablePacket,
    Error,
};

/// Subscribe code
#[repr(u8)]
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SubscribeReturnCode {
    MaximumQoSLevel0 = 0x00,
    MaximumQoSLevel1 = 0x01,
    MaximumQoSLevel2 = 0x02,
    Failure = 0x80,
}

impl SubscribeReturnCode {
    /// QoS granted by the server, `None` if the subscription was refused
    pub fn granted_qos(self) -> Option<QualityOfService> {
        match self {
            SubscribeReturnCode::MaximumQoSLevel0 => Some(QualityOfService::Level0),
            SubscribeReturnCode::MaximumQoSLevel1 => Some(QualityOfService::Level1),
            SubscribeReturnCode::MaximumQoSLevel2 => Some(QualityOfService::Level2),
            SubscribeReturnCode::Failure => None,
        }
    }
}

impl TryFrom<u8> for SubscribeReturnCode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(SubscribeReturnCode::MaximumQoSLevel0),
            0x01 => Ok(SubscribeReturnCode::MaximumQoSLevel1),
            0x02 => Ok(SubscribeReturnCode::MaximumQoSLevel2),
            0x80 => Ok(SubscribeReturnCode::Failure),
            code => Err(Error::InvalidSubscribeReturnCode(code)),
        }
    }
}

impl Display for SubscribeReturnCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// `SUBACK` packet
///
/// Return codes stay as a view into the decoded buffer, one byte per topic
/// filter of the matching `SUBSCRIBE`. Every byte is checked on decode.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct SubackPacket<'a> {
    packet_identifier: PacketIdentifier,
    return_codes: &'a [u8],
}

impl<'a> SubackPacket<'a> {
    pub fn packet_identifier(&self) -> u16 {
        self.packet_identifier.0
    }

    pub fn return_codes(&self) -> impl ExactSizeIterator<Item = SubscribeReturnCode> + 'a {
        self.return_codes.iter().map(|&code| {
            SubscribeReturnCode::try_from(code).unwrap_or(SubscribeReturnCode::Failure)
        })
    }

    /// Return code bytes as received
    pub fn raw_return_codes(&self) -> &'a [u8] {
        self.return_codes
    }
}

impl<'a> DecodablePacket<'a> for SubackPacket<'a> {
    fn decode_packet(mut payload: &'a [u8], _flags: u8) -> Result<Self, Error> {
        let packet_identifier = PacketIdentifier::decode(&mut payload)?;
        for &code in payload {
            SubscribeReturnCode::try_from(code)?;
        }

        Ok(Self {
            packet_identifier,
            return_codes: payload,
        })
    }
}

impl Display for SubackPacket<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{packet_identifier: {}, payload: {{return_codes: [",
            self.packet_identifier
        )?;
        let mut iter = self.return_codes();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for code in iter {
                write!(f, ", {}", code)?;
            }
        }
        write!(f, "]}}}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::v4::packet::VariablePacket;

    #[test]
    fn test_suback_packet_decode_hex() {
        let encoded_data = b"\x90\x04\x9d\x6c\x00\x00";

        let (packet, consumed) = VariablePacket::decode(encoded_data).unwrap();
        assert_eq!(consumed, encoded_data.len());

        let VariablePacket::Suback(packet) = packet else {
            panic!("expected SUBACK");
        };
        assert_eq!(packet.packet_identifier(), 40300);
        assert_eq!(
            packet.return_codes().collect::<Vec<_>>(),
            vec![
                SubscribeReturnCode::MaximumQoSLevel0,
                SubscribeReturnCode::MaximumQoSLevel0,
            ]
        );
    }

    #[test]
    fn test_suback_packet_return_codes_in_order() {
        let payload = b"\x27\x11\x02\x80\x01\x00";
        let packet = SubackPacket::decode_packet(payload, 0).unwrap();

        assert_eq!(packet.packet_identifier(), 10001);
        assert_eq!(packet.return_codes().len(), 4);
        assert_eq!(packet.raw_return_codes(), b"\x02\x80\x01\x00");
        assert_eq!(
            packet
                .return_codes()
                .map(SubscribeReturnCode::granted_qos)
                .collect::<Vec<_>>(),
            vec![
                Some(QualityOfService::Level2),
                None,
                Some(QualityOfService::Level1),
                Some(QualityOfService::Level0),
            ]
        );
    }

    #[test]
    fn test_suback_packet_no_return_codes() {
        let packet = SubackPacket::decode_packet(b"\x00\x01", 0).unwrap();
        assert_eq!(packet.return_codes().count(), 0);
    }

    #[test]
    fn test_suback_packet_invalid_return_code() {
        assert!(matches!(
            SubackPacket::decode_packet(b"\x00\x01\x01\x03", 0),
            Err(Error::InvalidSubscribeReturnCode(0x03))
        ));
        assert!(matches!(
            SubackPacket::decode_packet(b"\x00", 0),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_subscribe_return_code_from_byte() {
        for (byte, qos) in [
            (0x00u8, QualityOfService::Level0),
            (0x01, QualityOfService::Level1),
            (0x02, QualityOfService::Level2),
        ] {
            let code = SubscribeReturnCode::try_from(byte).unwrap();
            assert_eq!(code as u8, byte);
            assert_eq!(code.granted_qos(), Some(qos));
        }
        assert_eq!(
            SubscribeReturnCode::try_from(0x80).unwrap(),
            SubscribeReturnCode::Failure
        );
    }

    #[test]
    fn test_display_suback_packet() {
        let packet = SubackPacket::decode_packet(b"\x00\x7b\x01\x80", 0).unwrap();

        assert_eq!(
            packet.to_string(),
            "{packet_identifier: 123, payload: {return_codes: [1, 128]}}"
        );
    }
}
