//! CONNECT

use std::io::{self, Write};

use byteorder::WriteBytesExt;

use crate::{
    common::{
        ConnectFlags, Encodable, KeepAlive, QualityOfService, VarBytes, PROTOCOL_NAME, SPEC_3_1_1,
    },
    v4::{control::PacketType, packet::EncodablePacket},
    Error,
};

/// `CONNECT` packet
///
/// The connect flags byte is not stored; it is derived from the fields on
/// every encode so it always agrees with what the payload carries.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct ConnectPacket<'a> {
    clean_session: bool,
    keep_alive: KeepAlive,
    payload: ConnectPacketPayload<'a>,
}

impl<'a> ConnectPacket<'a> {
    pub fn new(client_identifier: &'a [u8]) -> Self {
        Self {
            clean_session: false,
            keep_alive: KeepAlive(0),
            payload: ConnectPacketPayload::new(client_identifier),
        }
    }

    pub fn set_keep_alive(&mut self, keep_alive: u16) {
        self.keep_alive = KeepAlive(keep_alive);
    }

    pub fn set_clean_session(&mut self, clean_session: bool) {
        self.clean_session = clean_session;
    }

    pub fn set_client_identifier(&mut self, id: &'a [u8]) {
        self.payload.client_identifier = VarBytes(id);
    }

    pub fn set_will(&mut self, will_message: Option<LastWill<'a>>) {
        self.payload.last_will = will_message;
    }

    pub fn set_username(&mut self, username: Option<&'a [u8]>) {
        self.payload.username = username.map(VarBytes);
    }

    pub fn set_password(&mut self, password: Option<&'a [u8]>) {
        self.payload.password = password.map(VarBytes);
    }

    pub fn keep_alive(&self) -> u16 {
        self.keep_alive.0
    }

    pub fn clean_session(&self) -> bool {
        self.clean_session
    }

    pub fn client_identifier(&self) -> &'a [u8] {
        self.payload.client_identifier.0
    }

    pub fn will(&self) -> Option<LastWill<'a>> {
        self.payload.last_will
    }

    pub fn username(&self) -> Option<&'a [u8]> {
        self.payload.username.map(|x| x.0)
    }

    pub fn password(&self) -> Option<&'a [u8]> {
        self.payload.password.map(|x| x.0)
    }

    pub fn connect_flags(&self) -> ConnectFlags {
        let will = self.payload.last_will;
        ConnectFlags {
            username: self.payload.username.is_some(),
            password: self.payload.password.is_some(),
            will_retain: will.is_some_and(|w| w.retain),
            will_qos: will.map_or(QualityOfService::Level0, |w| w.qos),
            will_flag: will.is_some(),
            clean_session: self.clean_session,
        }
    }
}

impl EncodablePacket for ConnectPacket<'_> {
    fn packet_type(&self) -> PacketType {
        PacketType::Connect
    }

    fn encode_packet<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        VarBytes(PROTOCOL_NAME).encode(writer)?;
        writer.write_u8(SPEC_3_1_1)?;
        self.connect_flags().encode(writer)?;
        self.keep_alive.encode(writer)?;
        self.payload.encode(writer)?;
        Ok(())
    }

    fn encoded_packet_length(&self) -> Result<u32, Error> {
        let header = VarBytes(PROTOCOL_NAME).encoded_length()
            + 1
            + self.connect_flags().encoded_length()
            + self.keep_alive.encoded_length();
        Ok(header.saturating_add(self.payload.encoded_length()))
    }
}

/// Payloads for connect packet
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
struct ConnectPacketPayload<'a> {
    client_identifier: VarBytes<'a>,
    last_will: Option<LastWill<'a>>,
    username: Option<VarBytes<'a>>,
    password: Option<VarBytes<'a>>,
}

impl<'a> ConnectPacketPayload<'a> {
    fn new(client_identifier: &'a [u8]) -> Self {
        Self {
            client_identifier: VarBytes(client_identifier),
            last_will: None,
            username: None,
            password: None,
        }
    }
}

impl Encodable for ConnectPacketPayload<'_> {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.client_identifier.encode(writer)?;
        self.last_will.encode(writer)?;
        self.username.encode(writer)?;
        self.password.encode(writer)
    }

    fn encoded_length(&self) -> u32 {
        self.client_identifier
            .encoded_length()
            .saturating_add(self.last_will.encoded_length())
            .saturating_add(self.username.encoded_length())
            .saturating_add(self.password.encoded_length())
    }
}

/// Will message published by the server when the client goes away without
/// a `DISCONNECT`
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct LastWill<'a> {
    topic: VarBytes<'a>,
    message: VarBytes<'a>,
    qos: QualityOfService,
    retain: bool,
}

impl<'a> LastWill<'a> {
    pub fn new(topic: &'a [u8], message: &'a [u8], qos: QualityOfService, retain: bool) -> Self {
        Self {
            topic: VarBytes(topic),
            message: VarBytes(message),
            qos,
            retain,
        }
    }

    pub fn topic(&self) -> &'a [u8] {
        self.topic.0
    }

    pub fn message(&self) -> &'a [u8] {
        self.message.0
    }

    pub fn qos(&self) -> QualityOfService {
        self.qos
    }

    pub fn retain(&self) -> bool {
        self.retain
    }
}

impl Encodable for LastWill<'_> {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.topic.encode(writer)?;
        self.message.encode(writer)
    }

    fn encoded_length(&self) -> u32 {
        self.topic
            .encoded_length()
            .saturating_add(self.message.encoded_length())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::common::variable_header::connect_flags::{
        CLEAN_SESSION, PASSWORD, USERNAME, WILL_FLAG, WILL_RETAIN,
    };

    #[test]
    fn test_connect_packet_encode_basic() {
        let packet = ConnectPacket::new(b"12345");
        let expected = b"\x10\x11\x00\x04MQTT\x04\x00\x00\x00\x00\x0512345";

        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();

        assert_eq!(&expected[..], &buf[..]);
        assert_eq!(packet.encoded_length().unwrap() as usize, buf.len());
    }

    #[test]
    fn test_connect_packet_encode_full() {
        let mut packet = ConnectPacket::new(b"c1");
        packet.set_clean_session(true);
        packet.set_keep_alive(10);
        packet.set_will(Some(LastWill::new(
            b"w",
            b"bye",
            QualityOfService::Level1,
            true,
        )));
        packet.set_username(Some(&b"u"[..]));
        packet.set_password(Some(&b"p"[..]));

        let expected = b"\x10\x1c\x00\x04MQTT\x04\xee\x00\x0a\x00\x02c1\x00\x01w\x00\x03bye\x00\x01u\x00\x01p";

        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();

        assert_eq!(&expected[..], &buf[..]);
    }

    #[test]
    fn test_connect_packet_username() {
        let mut packet = ConnectPacket::new(b"12345");
        packet.set_username(Some(&b"mqtt_player"[..]));

        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();

        assert_eq!(buf[9], USERNAME);
        assert_eq!(&buf[buf.len() - 13..], b"\x00\x0bmqtt_player");
        assert_eq!(packet.username(), Some(&b"mqtt_player"[..]));
        assert_eq!(packet.password(), None);
    }

    #[test]
    fn test_connect_flags_follow_fields() {
        let mut packet = ConnectPacket::new(b"id");
        assert_eq!(packet.connect_flags().bits(), 0);

        packet.set_clean_session(true);
        assert_eq!(packet.connect_flags().bits(), CLEAN_SESSION);

        packet.set_will(Some(LastWill::new(
            b"t",
            b"m",
            QualityOfService::Level2,
            true,
        )));
        assert_eq!(
            packet.connect_flags().bits(),
            CLEAN_SESSION | WILL_FLAG | (2 << 3) | WILL_RETAIN
        );

        // will qos and retain go away together with the will
        packet.set_will(None);
        packet.set_password(Some(&b"secret"[..]));
        assert_eq!(packet.connect_flags().bits(), CLEAN_SESSION | PASSWORD);

        packet.set_password(None);
        assert_eq!(packet.connect_flags().bits(), CLEAN_SESSION);
    }

    #[test]
    fn test_connect_packet_short_writer() {
        let packet = ConnectPacket::new(b"12345");

        let mut buf = [0u8; 10];
        let mut writer = &mut buf[..];
        assert!(matches!(
            packet.encode(&mut writer),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_last_will_accessors() {
        let will = LastWill::new(b"a/b", b"gone", QualityOfService::Level1, false);

        assert_eq!(will.topic(), b"a/b");
        assert_eq!(will.message(), b"gone");
        assert_eq!(will.qos(), QualityOfService::Level1);
        assert!(!will.retain());
        assert_eq!(will.encoded_length(), 11);
    }
}
