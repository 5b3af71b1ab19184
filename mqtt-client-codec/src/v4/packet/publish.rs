//! PUBLISH

use std::{fmt::Display, io::Write};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    common::{take, Decodable, Encodable, PacketIdentifier, QualityOfService, VarBytes},
    v4::{
        control::PacketType,
        packet::{DecodablePacket, EncodablePacket},
    },
    Error,
};

const RETAIN: u8 = 0b0001;
const QOS_MASK: u8 = 0b0110;
const QOS_SHIFT: u8 = 1;
const DUP: u8 = 0b1000;

/// `PUBLISH` packet
///
/// Topic name and payload are views into the buffer the packet was decoded
/// from (or built over) and share its lifetime.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct PublishPacket<'a> {
    dup: bool,
    qos: QualityOfService,
    retain: bool,
    topic_name: VarBytes<'a>,
    packet_identifier: Option<PacketIdentifier>,
    payload: &'a [u8],
}

impl<'a> PublishPacket<'a> {
    /// A packet with QoS above 0 also needs `set_packet_identifier` before it
    /// can be encoded.
    pub fn new(topic_name: &'a [u8], qos: QualityOfService, payload: &'a [u8]) -> Self {
        Self {
            dup: false,
            qos,
            retain: false,
            topic_name: VarBytes(topic_name),
            packet_identifier: None,
            payload,
        }
    }

    pub fn set_dup(&mut self, dup: bool) {
        self.dup = dup;
    }

    pub fn dup(&self) -> bool {
        self.dup
    }

    pub fn set_qos(&mut self, qos: QualityOfService) {
        self.qos = qos;
    }

    pub fn qos(&self) -> QualityOfService {
        self.qos
    }

    pub fn set_retain(&mut self, ret: bool) {
        self.retain = ret;
    }

    pub fn retain(&self) -> bool {
        self.retain
    }

    /// Ignored on encode when QoS is 0
    pub fn set_packet_identifier(&mut self, pkid: Option<u16>) {
        self.packet_identifier = pkid.map(PacketIdentifier);
    }

    pub fn packet_identifier(&self) -> Option<u16> {
        self.packet_identifier.map(|pkid| pkid.0)
    }

    pub fn set_topic_name(&mut self, topic_name: &'a [u8]) {
        self.topic_name = VarBytes(topic_name);
    }

    pub fn topic_name(&self) -> &'a [u8] {
        self.topic_name.0
    }

    pub fn set_payload(&mut self, payload: &'a [u8]) {
        self.payload = payload;
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Identifier written on the wire, `None` for QoS 0
    fn wire_packet_identifier(&self) -> Result<Option<PacketIdentifier>, Error> {
        match self.qos {
            QualityOfService::Level0 => Ok(None),
            QualityOfService::Level1 | QualityOfService::Level2 => {
                self.packet_identifier.map(Some).ok_or(Error::MissingPacketId)
            }
        }
    }
}

impl EncodablePacket for PublishPacket<'_> {
    fn packet_type(&self) -> PacketType {
        PacketType::Publish
    }

    fn flags(&self) -> u8 {
        let mut flags = u8::from(self.qos) << QOS_SHIFT;
        if self.dup {
            flags |= DUP;
        }
        if self.retain {
            flags |= RETAIN;
        }
        flags
    }

    fn encode_packet<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        let packet_identifier = self.wire_packet_identifier()?;
        self.topic_name.encode(writer)?;
        packet_identifier.encode(writer)?;
        self.payload.encode(writer)?;
        Ok(())
    }

    fn encoded_packet_length(&self) -> Result<u32, Error> {
        Ok(self
            .topic_name
            .encoded_length()
            .saturating_add(self.wire_packet_identifier()?.encoded_length())
            .saturating_add(self.payload.encoded_length()))
    }
}

impl<'a> DecodablePacket<'a> for PublishPacket<'a> {
    fn decode_packet(mut payload: &'a [u8], flags: u8) -> Result<Self, Error> {
        let retain = flags & RETAIN != 0;
        let qos = QualityOfService::try_from((flags & QOS_MASK) >> QOS_SHIFT)?;
        let dup = flags & DUP != 0;

        let topic_len = payload.read_u16::<BigEndian>()? as usize;
        if topic_len > payload.len() {
            return Err(Error::InvalidTopicLength(topic_len, payload.len()));
        }
        let topic_name = VarBytes(take(&mut payload, topic_len)?);

        let packet_identifier = match qos {
            QualityOfService::Level0 => None,
            QualityOfService::Level1 | QualityOfService::Level2 => {
                Some(PacketIdentifier::decode(&mut payload)?)
            }
        };

        Ok(Self {
            dup,
            qos,
            retain,
            topic_name,
            packet_identifier,
            payload,
        })
    }
}

impl Display for PublishPacket<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{dup: {}, qos: {}, retain: {}, topic_name: {}",
            self.dup,
            self.qos,
            self.retain,
            String::from_utf8_lossy(self.topic_name.0)
        )?;
        match self.packet_identifier {
            Some(packet_identifier) => write!(f, ", packet_identifier: {packet_identifier}")?,
            None => write!(f, ", packet_identifier: None")?,
        };

        match std::str::from_utf8(self.payload) {
            Ok(s) if s.chars().all(|c| c.is_ascii_graphic() || c == ' ') => {
                write!(f, ", payload: {s}")?;
            }
            _ => {
                write!(f, ", payload: [")?;
                let mut iter = self.payload.iter();
                if let Some(first) = iter.next() {
                    write!(f, "{first}")?;
                    for byte in iter {
                        write!(f, ", {byte}")?;
                    }
                }
                write!(f, "]")?;
            }
        };
        write!(f, "}}")
    }
}
