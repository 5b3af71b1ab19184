use std::io;

use crate::v4::control::PacketType;

/// Errors raised while encoding or decoding a packet
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid quality of service ({0})")]
    InvalidQoS(u8),
    #[error("topic of {0} bytes overruns the {1} remaining bytes")]
    InvalidTopicLength(usize, usize),
    #[error("unhandled packet type {0}")]
    UnhandledPacket(PacketType),
    #[error("packet too big ({0} bytes)")]
    PacketTooBig(u32),
    #[error("malformed remaining length")]
    InvalidLength,
    #[error("missing packet identifier")]
    MissingPacketId,
    #[error("reserved packet type ({0})")]
    InvalidPacketType(u8),
    #[error("invalid reserved flag")]
    InvalidReservedFlag,
    #[error("invalid subscribe return code {0:#04X}")]
    InvalidSubscribeReturnCode(u8),
    #[error(transparent)]
    IoError(#[from] io::Error),
}
