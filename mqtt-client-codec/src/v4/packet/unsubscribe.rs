//! UNSUBSCRIBE

use std::{
    fmt::Display,
    io::{self, Write},
};

use crate::common::{Encodable, PacketIdentifier, VarBytes};

/// `UNSUBSCRIBE` packet
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct UnsubscribePacket<'a> {
    packet_identifier: PacketIdentifier,
    payload: UnsubscribePacketPayload<'a>,
}

encodable_packet!(UnsubscribePacket<'a> => Unsubscribe(packet_identifier, payload));

impl<'a> UnsubscribePacket<'a> {
    pub fn new(pkid: u16, topic_filters: &'a [&'a [u8]]) -> Self {
        Self {
            packet_identifier: PacketIdentifier(pkid),
            payload: UnsubscribePacketPayload { topic_filters },
        }
    }

    pub fn packet_identifier(&self) -> u16 {
        self.packet_identifier.0
    }

    pub fn set_packet_identifier(&mut self, pkid: u16) {
        self.packet_identifier.0 = pkid;
    }

    pub fn topic_filters(&self) -> &'a [&'a [u8]] {
        self.payload.topic_filters
    }
}

impl Display for UnsubscribePacket<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{packet_identifier: {}, payload: {}}}",
            self.packet_identifier, self.payload
        )
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
struct UnsubscribePacketPayload<'a> {
    topic_filters: &'a [&'a [u8]],
}

impl Encodable for UnsubscribePacketPayload<'_> {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        for filter in self.topic_filters.iter() {
            VarBytes(filter).encode(writer)?;
        }

        Ok(())
    }

    fn encoded_length(&self) -> u32 {
        self.topic_filters
            .iter()
            .fold(0u32, |b, a| b.saturating_add(VarBytes(a).encoded_length()))
    }
}

impl Display for UnsubscribePacketPayload<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{topic_filters: [")?;
        let mut iter = self.topic_filters.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", String::from_utf8_lossy(first))?;
            for topic_filter in iter {
                write!(f, ", {}", String::from_utf8_lossy(topic_filter))?;
            }
        }
        write!(f, "]}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::v4::packet::{EncodablePacket, VariablePacket};

    #[test]
    fn test_unsubscribe_packet_encode_hex() {
        let topics: [&[u8]; 1] = [b"a/b"];
        let packet = UnsubscribePacket::new(40304, &topics);

        let expected = b"\xa2\x07\x9d\x70\x00\x03\x61\x2f\x62";

        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();

        assert_eq!(&expected[..], &buf[..]);
    }

    #[test]
    fn test_unsubscribe_packet_multiple_topics() {
        let topics: [&[u8]; 2] = [b"a/b", b"a/c"];
        let packet = UnsubscribePacket::new(10001, &topics);

        let expected = b"\xa2\x0c\x27\x11\x00\x03a/b\x00\x03a/c";

        let mut buf = Vec::new();
        VariablePacket::from(packet).serialize(&mut buf).unwrap();

        assert_eq!(&expected[..], &buf[..]);
        assert_eq!(packet.topic_filters().len(), 2);
    }

    #[test]
    fn test_display_unsubscribe_packet() {
        let topics: [&[u8]; 2] = [b"test/topic/1", b"test/topic/2"];
        let packet = UnsubscribePacket::new(2345, &topics);

        assert_eq!(
            packet.to_string(),
            "{packet_identifier: 2345, payload: {topic_filters: [test/topic/1, test/topic/2]}}"
        );
    }
}
