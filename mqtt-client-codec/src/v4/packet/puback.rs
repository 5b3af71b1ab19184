//! PUBACK

packet_identifier_packet! {
    /// `PUBACK` packet
    PubackPacket => PublishAcknowledgement
}

#[cfg(test)]
mod test {
    use crate::v4::packet::{DecodablePacket, EncodablePacket};

    use super::*;

    #[test]
    pub fn test_puback_packet_encode_hex() {
        let packet = PubackPacket::new(40306);

        let expected = b"\x40\x02\x9d\x72";

        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();

        assert_eq!(&expected[..], &buf[..]);
    }

    #[test]
    pub fn test_puback_packet_decode_hex() {
        let packet = PubackPacket::decode_packet(b"\x9d\x73", 0).unwrap();

        assert_eq!(PubackPacket::new(40307), packet);
    }
}
