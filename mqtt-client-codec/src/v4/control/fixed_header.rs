//! Fixed header in MQTT

use std::{
    fmt::Display,
    io::{self, Write},
};

use byteorder::{ReadBytesExt, WriteBytesExt};
#[cfg(feature = "parse")]
use tokio::io::AsyncRead;

use crate::{
    common::{Decodable, Encodable, VarInt},
    Error,
};

use super::PacketType;

/// Fixed header for each MQTT control packet
///
/// Format:
///
/// ```plain
/// 7                          3                          0
/// +--------------------------+--------------------------+
/// | MQTT Control Packet Type | Flags for each type      |
/// +--------------------------+--------------------------+
/// | Remaining Length ...                                |
/// +-----------------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FixedHeader {
    packet_type: PacketType,
    flags: u8,
    remaining_length: VarInt,
}

impl FixedHeader {
    /// Fails with `PacketTooBig` if `remaining_length` does not fit in four bytes
    pub fn new(packet_type: PacketType, flags: u8, remaining_length: u32) -> Result<Self, Error> {
        Ok(Self {
            packet_type,
            flags: flags & 0x0F,
            remaining_length: VarInt::new(remaining_length)?,
        })
    }

    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// The Remaining Length is the number of bytes remaining within the current packet,
    /// including data in the variable header and the payload. The Remaining Length does
    /// not include the bytes used to encode the Remaining Length.
    pub fn remaining_length(&self) -> u32 {
        self.remaining_length.value()
    }

    /// Asynchronously parse a single fixed header from an AsyncRead type, such as a network
    /// socket.
    #[cfg(feature = "parse")]
    pub async fn parse<A: AsyncRead + Unpin>(rdr: &mut A) -> Result<Self, Error> {
        use tokio::io::AsyncReadExt;

        let type_val = AsyncReadExt::read_u8(rdr).await?;

        let mut remaining_len = 0u32;
        for i in 0..4 {
            let byte = AsyncReadExt::read_u8(rdr).await?;
            remaining_len |= (u32::from(byte) & 0x7F) << (7 * i);

            if byte & 0x80 == 0 {
                return Self::new(PacketType::try_from(type_val >> 4)?, type_val, remaining_len);
            }
        }

        Err(Error::InvalidLength)
    }
}

impl Encodable for FixedHeader {
    fn encode<W: Write>(&self, wr: &mut W) -> io::Result<()> {
        wr.write_u8((u8::from(self.packet_type) << 4) | self.flags)?;
        self.remaining_length.encode(wr)
    }

    fn encoded_length(&self) -> u32 {
        1 + self.remaining_length.encoded_length()
    }
}

impl<'a> Decodable<'a> for FixedHeader {
    type Cond = ();

    fn decode_with(rdr: &mut &'a [u8], _rest: ()) -> Result<Self, Error> {
        let type_val = ReadBytesExt::read_u8(rdr)?;
        let remaining_length = VarInt::decode(rdr)?;
        let packet_type = PacketType::try_from(type_val >> 4)?;

        Ok(Self {
            packet_type,
            flags: type_val & 0x0F,
            remaining_length,
        })
    }
}

/// Like `FixedHeader::decode()`, but for a framing layer: returns `None` if the
/// buffer ends before the header does, otherwise the header and its size in bytes.
pub fn decode_header(data: &[u8]) -> Option<Result<(FixedHeader, usize), Error>> {
    let mut rest = data;
    match FixedHeader::decode(&mut rest) {
        Ok(header) => Some(Ok((header, data.len() - rest.len()))),
        Err(Error::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(e) => Some(Err(e)),
    }
}

impl Display for FixedHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{packet_type: {}, flags: {:#06b}, remaining_length: {}}}",
            self.packet_type,
            self.flags,
            self.remaining_length()
        )
    }
}
