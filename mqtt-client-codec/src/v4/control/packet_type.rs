//! Packet types

use std::fmt::Display;

use crate::Error;

/// Defined control packet types of MQTT v3.1.1
#[repr(u8)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum PacketType {
    /// Client request to connect to Server
    Connect = value::CONNECT,
    /// Connect acknowledgment
    ConnectAcknowledgement = value::CONNACK,
    /// Publish message
    Publish = value::PUBLISH,
    /// Publish acknowledgment
    PublishAcknowledgement = value::PUBACK,
    /// Publish received (assured delivery part 1)
    PublishReceived = value::PUBREC,
    /// Publish release (assured delivery part 2)
    PublishRelease = value::PUBREL,
    /// Publish complete (assured delivery part 3)
    PublishComplete = value::PUBCOMP,
    /// Client subscribe request
    Subscribe = value::SUBSCRIBE,
    /// Subscribe acknowledgment
    SubscribeAcknowledgement = value::SUBACK,
    /// Unsubscribe request
    Unsubscribe = value::UNSUBSCRIBE,
    /// Unsubscribe acknowledgment
    UnsubscribeAcknowledgement = value::UNSUBACK,
    /// PING request
    PingRequest = value::PINGREQ,
    /// PING response
    PingResponse = value::PINGRESP,
    /// Client is disconnecting
    Disconnect = value::DISCONNECT,
}

impl PacketType {
    /// Flags nibble mandated for every type except `PUBLISH`, whose flags carry
    /// dup, QoS and retain.
    ///
    /// <http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html#_Table_2.2_->
    #[inline]
    pub fn default_flags(self) -> u8 {
        match self {
            PacketType::PublishRelease | PacketType::Subscribe | PacketType::Unsubscribe => 0b0010,
            _ => 0,
        }
    }
}

impl From<PacketType> for u8 {
    fn from(value: PacketType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for PacketType {
    type Error = Error;

    /// Converts the high nibble of the first header byte, already shifted down
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let typ = match value {
            value::CONNECT => PacketType::Connect,
            value::CONNACK => PacketType::ConnectAcknowledgement,
            value::PUBLISH => PacketType::Publish,
            value::PUBACK => PacketType::PublishAcknowledgement,
            value::PUBREC => PacketType::PublishReceived,
            value::PUBREL => PacketType::PublishRelease,
            value::PUBCOMP => PacketType::PublishComplete,
            value::SUBSCRIBE => PacketType::Subscribe,
            value::SUBACK => PacketType::SubscribeAcknowledgement,
            value::UNSUBSCRIBE => PacketType::Unsubscribe,
            value::UNSUBACK => PacketType::UnsubscribeAcknowledgement,
            value::PINGREQ => PacketType::PingRequest,
            value::PINGRESP => PacketType::PingResponse,
            value::DISCONNECT => PacketType::Disconnect,
            other => return Err(Error::InvalidPacketType(other)),
        };
        Ok(typ)
    }
}

impl Display for PacketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PacketType::Connect => "CONNECT",
            PacketType::ConnectAcknowledgement => "CONNACK",
            PacketType::Publish => "PUBLISH",
            PacketType::PublishAcknowledgement => "PUBACK",
            PacketType::PublishReceived => "PUBREC",
            PacketType::PublishRelease => "PUBREL",
            PacketType::PublishComplete => "PUBCOMP",
            PacketType::Subscribe => "SUBSCRIBE",
            PacketType::SubscribeAcknowledgement => "SUBACK",
            PacketType::Unsubscribe => "UNSUBSCRIBE",
            PacketType::UnsubscribeAcknowledgement => "UNSUBACK",
            PacketType::PingRequest => "PINGREQ",
            PacketType::PingResponse => "PINGRESP",
            PacketType::Disconnect => "DISCONNECT",
        };
        f.write_str(name)
    }
}

mod value {
    pub const CONNECT: u8 = 1;
    pub const CONNACK: u8 = 2;
    pub const PUBLISH: u8 = 3;
    pub const PUBACK: u8 = 4;
    pub const PUBREC: u8 = 5;
    pub const PUBREL: u8 = 6;
    pub const PUBCOMP: u8 = 7;
    pub const SUBSCRIBE: u8 = 8;
    pub const SUBACK: u8 = 9;
    pub const UNSUBSCRIBE: u8 = 10;
    pub const UNSUBACK: u8 = 11;
    pub const PINGREQ: u8 = 12;
    pub const PINGRESP: u8 = 13;
    pub const DISCONNECT: u8 = 14;
}
