pub use self::{
    connect_ack_flags::ConnackFlags,
    connect_flags::ConnectFlags,
    keep_alive::KeepAlive,
    packet_identifier::PacketIdentifier,
    protocol_level::{PROTOCOL_NAME, SPEC_3_1_1},
};

pub mod connect_ack_flags;
pub mod connect_flags;
pub mod keep_alive;
pub mod packet_identifier;
pub mod protocol_level;
