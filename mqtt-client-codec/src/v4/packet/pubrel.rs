//! PUBREL

packet_identifier_packet! {
    /// `PUBREL` packet
    PubrelPacket => PublishRelease
}

#[cfg(test)]
mod test {
    use crate::v4::packet::{DecodablePacket, EncodablePacket};

    use super::*;

    #[test]
    pub fn test_pubrel_packet_encode_hex() {
        let packet = PubrelPacket::new(40306);

        let expected = b"\x62\x02\x9d\x72";

        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();

        assert_eq!(&expected[..], &buf[..]);
    }

    #[test]
    pub fn test_pubrel_packet_decode_hex() {
        let packet = PubrelPacket::decode_packet(b"\x9d\x73", 0).unwrap();

        assert_eq!(PubrelPacket::new(40307), packet);
    }

    #[test]
    pub fn test_pubrel_packet_reserved_flags() {
        let packet = PubrelPacket::new(1);

        assert_eq!(packet.flags(), 0b0010);
        assert_eq!(packet.encoded_length().unwrap(), 4);
    }
}
