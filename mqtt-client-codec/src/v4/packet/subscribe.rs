//! SUBSCRIBE

use std::{
    fmt::Display,
    io::{self, Write},
};

use byteorder::WriteBytesExt;

use crate::common::{Encodable, PacketIdentifier, QualityOfService, VarBytes};

/// `SUBSCRIBE` packet
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct SubscribePacket<'a> {
    packet_identifier: PacketIdentifier,
    payload: SubscribePacketPayload<'a>,
}

encodable_packet!(SubscribePacket<'a> => Subscribe(packet_identifier, payload));

impl<'a> SubscribePacket<'a> {
    /// Topic filters with their requested QoS, in the order the `SUBACK`
    /// return codes will come back
    pub fn new(pkid: u16, subscribes: &'a [(&'a [u8], QualityOfService)]) -> Self {
        Self {
            packet_identifier: PacketIdentifier(pkid),
            payload: SubscribePacketPayload { subscribes },
        }
    }

    pub fn packet_identifier(&self) -> u16 {
        self.packet_identifier.0
    }

    pub fn set_packet_identifier(&mut self, pkid: u16) {
        self.packet_identifier.0 = pkid;
    }

    pub fn subscribes(&self) -> &'a [(&'a [u8], QualityOfService)] {
        self.payload.subscribes
    }
}

impl Display for SubscribePacket<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{packet_identifier: {}, payload: {}}}",
            self.packet_identifier, self.payload
        )
    }
}

/// Payload of subscribe packet
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
struct SubscribePacketPayload<'a> {
    subscribes: &'a [(&'a [u8], QualityOfService)],
}

impl Encodable for SubscribePacketPayload<'_> {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        for (filter, qos) in self.subscribes.iter() {
            VarBytes(filter).encode(writer)?;
            writer.write_u8(u8::from(*qos))?;
        }

        Ok(())
    }

    fn encoded_length(&self) -> u32 {
        self.subscribes.iter().fold(0u32, |b, (filter, _)| {
            b.saturating_add(VarBytes(filter).encoded_length() + 1)
        })
    }
}

impl Display for SubscribePacketPayload<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{subscribes: [")?;
        let mut iter = self.subscribes.iter();
        if let Some((filter, qos)) = iter.next() {
            write!(f, "({}, {})", String::from_utf8_lossy(filter), qos)?;
            for (filter, qos) in iter {
                write!(f, ", ({}, {})", String::from_utf8_lossy(filter), qos)?;
            }
        }
        write!(f, "]}}")
    }
}
