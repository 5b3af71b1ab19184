//! Specific packets

use std::io::{self, Write};

use crate::{
    common::{take, Decodable, Encodable},
    v4::control::{FixedHeader, PacketType},
    Error,
};

macro_rules! encodable_packet {
    ($typ:ident $(<$lt:lifetime>)? => $ptype:ident ($($field:ident),* $(,)?)) => {
        impl $(<$lt>)? $crate::v4::packet::EncodablePacket for $typ $(<$lt>)? {
            fn packet_type(&self) -> $crate::v4::control::PacketType {
                $crate::v4::control::PacketType::$ptype
            }

            #[allow(unused_variables)]
            fn encode_packet<W: ::std::io::Write>(&self, writer: &mut W) -> Result<(), $crate::Error> {
                $($crate::common::Encodable::encode(&self.$field, writer)?;)*
                Ok(())
            }

            fn encoded_packet_length(&self) -> Result<u32, $crate::Error> {
                // saturates so an oversized body surfaces as PacketTooBig
                Ok(0u32 $(.saturating_add($crate::common::Encodable::encoded_length(&self.$field)))*)
            }
        }
    };
}

/// Packets whose whole variable header is a packet identifier. Naming the
/// packet type also makes the packet encodable.
macro_rules! packet_identifier_packet {
    ($(#[$attr:meta])* $typ:ident => $ptype:ident) => {
        packet_identifier_packet!($(#[$attr])* $typ);

        encodable_packet!($typ => $ptype(packet_identifier));
    };
    ($(#[$attr:meta])* $typ:ident) => {
        $(#[$attr])*
        #[derive(Debug, Eq, PartialEq, Clone, Copy)]
        pub struct $typ {
            packet_identifier: $crate::common::PacketIdentifier,
        }

        impl $typ {
            pub fn new(pkid: u16) -> Self {
                Self {
                    packet_identifier: $crate::common::PacketIdentifier(pkid),
                }
            }

            pub fn packet_identifier(&self) -> u16 {
                self.packet_identifier.0
            }

            pub fn set_packet_identifier(&mut self, pkid: u16) {
                self.packet_identifier.0 = pkid;
            }
        }

        impl<'a> $crate::v4::packet::DecodablePacket<'a> for $typ {
            fn decode_packet(mut payload: &'a [u8], _flags: u8) -> Result<Self, $crate::Error> {
                let packet_identifier =
                    <$crate::common::PacketIdentifier as $crate::common::Decodable>::decode(
                        &mut payload,
                    )?;
                Ok(Self { packet_identifier })
            }
        }
    };
}

pub use self::{
    connack::ConnackPacket,
    connect::{ConnectPacket, LastWill},
    puback::PubackPacket,
    pubcomp::PubcompPacket,
    publish::PublishPacket,
    pubrec::PubrecPacket,
    pubrel::PubrelPacket,
    suback::{SubackPacket, SubscribeReturnCode},
    subscribe::SubscribePacket,
    unsuback::UnsubackPacket,
    unsubscribe::UnsubscribePacket,
};
#[cfg(feature = "bytes")]
pub use self::raw::RawPacket;

pub mod connack;
pub mod connect;
pub mod puback;
pub mod pubcomp;
pub mod publish;
pub mod pubrec;
pub mod pubrel;
#[cfg(feature = "bytes")]
pub mod raw;
pub mod suback;
pub mod subscribe;
pub mod unsuback;
pub mod unsubscribe;

/// A packet that can be encoded. The fixed header is derived from the packet
/// content, so the remaining length always matches what gets written.
pub trait EncodablePacket {
    /// Control packet type, the high nibble of the first header byte
    fn packet_type(&self) -> PacketType;

    /// Flags nibble of the first header byte
    fn flags(&self) -> u8 {
        self.packet_type().default_flags()
    }

    /// Encodes packet data after fixed header, including variable headers and payload
    fn encode_packet<W: Write>(&self, _writer: &mut W) -> Result<(), Error> {
        Ok(())
    }

    /// Length in bytes for data after fixed header, including variable headers and payload
    fn encoded_packet_length(&self) -> Result<u32, Error> {
        Ok(0)
    }

    fn fixed_header(&self) -> Result<FixedHeader, Error> {
        FixedHeader::new(self.packet_type(), self.flags(), self.encoded_packet_length()?)
    }

    /// Length in bytes of the whole packet, fixed header included
    fn encoded_length(&self) -> Result<u32, Error> {
        let header = self.fixed_header()?;
        Ok(header.encoded_length() + header.remaining_length())
    }

    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        self.fixed_header()?.encode(writer)?;
        self.encode_packet(writer)
    }
}

pub trait DecodablePacket<'a>: Sized {
    /// Decode packet given the flags nibble and the bytes after the fixed header
    fn decode_packet(payload: &'a [u8], flags: u8) -> Result<Self, Error>;
}

/// Any MQTT v3.1.1 control packet.
///
/// Decoding covers what a server sends to a client, encoding covers what a
/// client sends to a server. The other direction fails with `UnhandledPacket`.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum VariablePacket<'a> {
    Connect(ConnectPacket<'a>),
    Connack(ConnackPacket),
    Publish(PublishPacket<'a>),
    Puback(PubackPacket),
    Pubrec(PubrecPacket),
    Pubrel(PubrelPacket),
    Pubcomp(PubcompPacket),
    Subscribe(SubscribePacket<'a>),
    Suback(SubackPacket<'a>),
    Unsubscribe(UnsubscribePacket<'a>),
    Unsuback(UnsubackPacket),
    Pingreq,
    Pingresp,
    Disconnect,
}

impl<'a> VariablePacket<'a> {
    pub fn packet_type(&self) -> PacketType {
        match self {
            VariablePacket::Connect(_) => PacketType::Connect,
            VariablePacket::Connack(_) => PacketType::ConnectAcknowledgement,
            VariablePacket::Publish(_) => PacketType::Publish,
            VariablePacket::Puback(_) => PacketType::PublishAcknowledgement,
            VariablePacket::Pubrec(_) => PacketType::PublishReceived,
            VariablePacket::Pubrel(_) => PacketType::PublishRelease,
            VariablePacket::Pubcomp(_) => PacketType::PublishComplete,
            VariablePacket::Subscribe(_) => PacketType::Subscribe,
            VariablePacket::Suback(_) => PacketType::SubscribeAcknowledgement,
            VariablePacket::Unsubscribe(_) => PacketType::Unsubscribe,
            VariablePacket::Unsuback(_) => PacketType::UnsubscribeAcknowledgement,
            VariablePacket::Pingreq => PacketType::PingRequest,
            VariablePacket::Pingresp => PacketType::PingResponse,
            VariablePacket::Disconnect => PacketType::Disconnect,
        }
    }

    /// Decodes a packet sent by a server.
    ///
    /// `payload` holds exactly the remaining length bytes, the fixed header is
    /// already consumed. Topics and payloads of the result borrow from it.
    pub fn parse(packet_type: PacketType, flags: u8, payload: &'a [u8]) -> Result<Self, Error> {
        let packet = match packet_type {
            PacketType::ConnectAcknowledgement => {
                VariablePacket::Connack(ConnackPacket::decode_packet(payload, flags)?)
            }
            PacketType::Publish => {
                VariablePacket::Publish(PublishPacket::decode_packet(payload, flags)?)
            }
            PacketType::PublishAcknowledgement => {
                VariablePacket::Puback(PubackPacket::decode_packet(payload, flags)?)
            }
            PacketType::PublishReceived => {
                VariablePacket::Pubrec(PubrecPacket::decode_packet(payload, flags)?)
            }
            PacketType::PublishRelease => {
                VariablePacket::Pubrel(PubrelPacket::decode_packet(payload, flags)?)
            }
            PacketType::PublishComplete => {
                VariablePacket::Pubcomp(PubcompPacket::decode_packet(payload, flags)?)
            }
            PacketType::SubscribeAcknowledgement => {
                VariablePacket::Suback(SubackPacket::decode_packet(payload, flags)?)
            }
            PacketType::UnsubscribeAcknowledgement => {
                VariablePacket::Unsuback(UnsubackPacket::decode_packet(payload, flags)?)
            }
            PacketType::PingResponse => VariablePacket::Pingresp,
            PacketType::Connect
            | PacketType::Subscribe
            | PacketType::Unsubscribe
            | PacketType::PingRequest
            | PacketType::Disconnect => return Err(Error::UnhandledPacket(packet_type)),
        };
        Ok(packet)
    }

    /// Decodes one whole packet from the front of `buf`, fixed header
    /// included. Returns the packet and the number of bytes it occupied.
    pub fn decode(buf: &'a [u8]) -> Result<(Self, usize), Error> {
        let mut reader = buf;
        let fixed_header = FixedHeader::decode(&mut reader)?;
        let payload = take(&mut reader, fixed_header.remaining_length() as usize)?;
        let packet = Self::parse(fixed_header.packet_type(), fixed_header.flags(), payload)?;
        Ok((packet, buf.len() - reader.len()))
    }

    /// Fixed header of a packet sent by a client
    pub fn fixed_header(&self) -> Result<FixedHeader, Error> {
        match self {
            VariablePacket::Connect(pk) => pk.fixed_header(),
            VariablePacket::Publish(pk) => pk.fixed_header(),
            VariablePacket::Puback(pk) => pk.fixed_header(),
            VariablePacket::Pubrec(pk) => pk.fixed_header(),
            VariablePacket::Pubrel(pk) => pk.fixed_header(),
            VariablePacket::Pubcomp(pk) => pk.fixed_header(),
            VariablePacket::Subscribe(pk) => pk.fixed_header(),
            VariablePacket::Unsubscribe(pk) => pk.fixed_header(),
            VariablePacket::Pingreq | VariablePacket::Disconnect => {
                FixedHeader::new(self.packet_type(), 0, 0)
            }
            VariablePacket::Connack(_)
            | VariablePacket::Suback(_)
            | VariablePacket::Unsuback(_)
            | VariablePacket::Pingresp => Err(Error::UnhandledPacket(self.packet_type())),
        }
    }

    /// Bytes `serialize` writes, fixed header included
    pub fn serialized_length(&self) -> Result<u32, Error> {
        let fixed_header = self.fixed_header()?;
        Ok(fixed_header.encoded_length() + fixed_header.remaining_length())
    }

    /// Encodes a packet sent by a client. Nothing is written when the packet
    /// cannot be encoded; a short writer surfaces as `IoError`.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        self.fixed_header()?.encode(writer)?;
        match self {
            VariablePacket::Connect(pk) => pk.encode_packet(writer),
            VariablePacket::Publish(pk) => pk.encode_packet(writer),
            VariablePacket::Puback(pk) => pk.encode_packet(writer),
            VariablePacket::Pubrec(pk) => pk.encode_packet(writer),
            VariablePacket::Pubrel(pk) => pk.encode_packet(writer),
            VariablePacket::Pubcomp(pk) => pk.encode_packet(writer),
            VariablePacket::Subscribe(pk) => pk.encode_packet(writer),
            VariablePacket::Unsubscribe(pk) => pk.encode_packet(writer),
            VariablePacket::Pingreq | VariablePacket::Disconnect => Ok(()),
            VariablePacket::Connack(_)
            | VariablePacket::Suback(_)
            | VariablePacket::Unsuback(_)
            | VariablePacket::Pingresp => Err(Error::UnhandledPacket(self.packet_type())),
        }
    }

    /// Encodes into the front of `buf` and returns the number of bytes written.
    /// Fails without writing anything if `buf` is too small.
    pub fn encode_to_slice(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let length = self.serialized_length()? as usize;
        let mut dst = buf
            .get_mut(..length)
            .ok_or_else(|| io::Error::from(io::ErrorKind::WriteZero))?;
        self.serialize(&mut dst)?;
        Ok(length)
    }
}

macro_rules! impl_from_packet {
    ($($name:ident $(<$lt:lifetime>)? => $variant:ident,)+) => {
        $(
            impl<'a> From<$name $(<$lt>)?> for VariablePacket<'a> {
                fn from(pk: $name $(<$lt>)?) -> VariablePacket<'a> {
                    VariablePacket::$variant(pk)
                }
            }
        )+
    };
}

impl_from_packet! {
    ConnectPacket<'a>       => Connect,
    ConnackPacket           => Connack,
    PublishPacket<'a>       => Publish,
    PubackPacket            => Puback,
    PubrecPacket            => Pubrec,
    PubrelPacket            => Pubrel,
    PubcompPacket           => Pubcomp,
    SubscribePacket<'a>     => Subscribe,
    SubackPacket<'a>        => Suback,
    UnsubscribePacket<'a>   => Unsubscribe,
    UnsubackPacket          => Unsuback,
}

#[cfg(feature = "tokio-codec")]
mod codec;

#[cfg(feature = "tokio-codec")]
pub use codec::{MqttCodec, MqttDecoder, MqttEncoder};

#[cfg(test)]
mod test {
    use super::*;

    use crate::common::{QualityOfService, MAX_REMAINING_LENGTH};

    #[test]
    fn test_connect_exact_bytes() {
        let mut packet = ConnectPacket::new(b"c1");
        packet.set_clean_session(true);
        packet.set_keep_alive(60);

        let mut buf = Vec::new();
        VariablePacket::Connect(packet).serialize(&mut buf).unwrap();

        assert_eq!(&buf[..], b"\x10\x0e\x00\x04MQTT\x04\x02\x00\x3c\x00\x02c1");
    }

    #[test]
    fn test_header_only_packets() {
        let mut buf = Vec::new();
        VariablePacket::Pingreq.serialize(&mut buf).unwrap();
        VariablePacket::Disconnect.serialize(&mut buf).unwrap();
        assert_eq!(&buf[..], b"\xc0\x00\xe0\x00");

        assert_eq!(
            VariablePacket::parse(PacketType::PingResponse, 0, b"").unwrap(),
            VariablePacket::Pingresp
        );
        assert_eq!(VariablePacket::Pingreq.serialized_length().unwrap(), 2);
    }

    #[test]
    fn test_decode_only_server_packets() {
        for packet_type in [
            PacketType::Connect,
            PacketType::Subscribe,
            PacketType::Unsubscribe,
            PacketType::PingRequest,
            PacketType::Disconnect,
        ] {
            match VariablePacket::parse(packet_type, 0, b"\x00\x00") {
                Err(Error::UnhandledPacket(t)) => assert_eq!(t, packet_type),
                other => panic!("{packet_type} should be unhandled, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_encode_only_client_packets() {
        let (suback, _) = VariablePacket::decode(b"\x90\x03\x00\x01\x00").unwrap();
        let (connack, _) = VariablePacket::decode(b"\x20\x02\x00\x00").unwrap();
        let (unsuback, _) = VariablePacket::decode(b"\xb0\x02\x00\x01").unwrap();

        for packet in [suback, connack, unsuback, VariablePacket::Pingresp] {
            let mut buf = Vec::new();
            assert!(matches!(
                packet.serialize(&mut buf),
                Err(Error::UnhandledPacket(_))
            ));
            assert!(buf.is_empty());
            assert!(matches!(
                packet.serialized_length(),
                Err(Error::UnhandledPacket(_))
            ));
        }
    }

    #[test]
    fn test_decode_whole_frame() {
        let stream = b"\x40\x02\x00\x07\xd0\x00trailing";
        let (packet, consumed) = VariablePacket::decode(stream).unwrap();
        assert_eq!(packet, VariablePacket::Puback(PubackPacket::new(7)));
        assert_eq!(consumed, 4);

        let (packet, consumed) = VariablePacket::decode(&stream[consumed..]).unwrap();
        assert_eq!(packet, VariablePacket::Pingresp);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_decode_truncated_frame() {
        assert!(matches!(
            VariablePacket::decode(b"\x40\x02\x00"),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_encode_to_slice() {
        let packet: VariablePacket = PubrelPacket::new(0x1234).into();

        let mut buf = [0u8; 8];
        let written = packet.encode_to_slice(&mut buf).unwrap();
        assert_eq!(&buf[..written], b"\x62\x02\x12\x34");

        let mut small = [0u8; 3];
        match packet.encode_to_slice(&mut small) {
            Err(Error::IoError(e)) => assert_eq!(e.kind(), io::ErrorKind::WriteZero),
            other => panic!("expected short write, got {other:?}"),
        }
        assert_eq!(small, [0u8; 3]);
    }

    #[test]
    fn test_short_writer() {
        let topics: [(&[u8], QualityOfService); 1] = [(b"a/b", QualityOfService::Level1)];
        let packet = VariablePacket::Subscribe(SubscribePacket::new(1, &topics));

        let mut buf = [0u8; 4];
        let mut writer = &mut buf[..];
        assert!(matches!(
            packet.serialize(&mut writer),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_oversized_packets_rejected() {
        let filter = vec![b'a'; 65535];
        let subscribes = vec![(&filter[..], QualityOfService::Level0); 65537];
        let unsubscribes = vec![&filter[..]; 65537];
        let payload = vec![0u8; MAX_REMAINING_LENGTH as usize - 2];

        for packet in [
            VariablePacket::Subscribe(SubscribePacket::new(1, &subscribes)),
            VariablePacket::Unsubscribe(UnsubscribePacket::new(1, &unsubscribes)),
            VariablePacket::Publish(PublishPacket::new(
                b"t",
                QualityOfService::Level0,
                &payload,
            )),
        ] {
            assert!(matches!(
                packet.serialized_length(),
                Err(Error::PacketTooBig(_))
            ));

            let mut buf = Vec::new();
            assert!(matches!(
                packet.serialize(&mut buf),
                Err(Error::PacketTooBig(_))
            ));
            assert!(buf.is_empty());

            let mut small = [0u8; 16];
            assert!(matches!(
                packet.encode_to_slice(&mut small),
                Err(Error::PacketTooBig(_))
            ));
        }

        // one byte less fits the largest remaining length
        let largest = VariablePacket::Publish(PublishPacket::new(
            b"t",
            QualityOfService::Level0,
            &payload[1..],
        ));
        assert_eq!(
            largest.serialized_length().unwrap(),
            MAX_REMAINING_LENGTH + 5
        );
    }

    #[test]
    fn test_missing_packet_id_writes_nothing() {
        let packet = VariablePacket::Publish(PublishPacket::new(
            b"t",
            QualityOfService::Level2,
            b"x",
        ));
        let mut buf = Vec::new();
        assert!(matches!(
            packet.serialize(&mut buf),
            Err(Error::MissingPacketId)
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_subscribe_suback_ordering() {
        let topics: [(&[u8], QualityOfService); 3] = [
            (b"a", QualityOfService::Level0),
            (b"b", QualityOfService::Level2),
            (b"c", QualityOfService::Level1),
        ];
        let subscribe = SubscribePacket::new(9, &topics);
        let mut buf = Vec::new();
        VariablePacket::from(subscribe).serialize(&mut buf).unwrap();
        assert_eq!(&buf[..2], b"\x82\x0e");

        let (suback, _) = VariablePacket::decode(b"\x90\x05\x00\x09\x00\x80\x01").unwrap();
        let VariablePacket::Suback(suback) = suback else {
            panic!("expected SUBACK");
        };
        assert_eq!(suback.packet_identifier(), subscribe.packet_identifier());
        assert_eq!(suback.return_codes().count(), subscribe.subscribes().len());
        assert_eq!(
            suback.return_codes().collect::<Vec<_>>(),
            vec![
                SubscribeReturnCode::MaximumQoSLevel0,
                SubscribeReturnCode::Failure,
                SubscribeReturnCode::MaximumQoSLevel1,
            ]
        );
    }
}
