//! Owned frames

use std::fmt::Display;

use bytes::Bytes;
#[cfg(feature = "parse")]
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    common::Encodable,
    v4::{control::FixedHeader, packet::VariablePacket},
    Error,
};

/// One whole frame: a fixed header and exactly `remaining_length` bytes
/// after it.
///
/// The frame owns its bytes, `parse` hands out a packet borrowing from them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawPacket {
    fixed_header: FixedHeader,
    payload: Bytes,
}

impl RawPacket {
    /// Fails with `InvalidLength` if `payload` is not `remaining_length` long
    pub fn new(fixed_header: FixedHeader, payload: Bytes) -> Result<Self, Error> {
        if payload.len() != fixed_header.remaining_length() as usize {
            return Err(Error::InvalidLength);
        }
        Ok(Self {
            fixed_header,
            payload,
        })
    }

    pub fn fixed_header(&self) -> FixedHeader {
        self.fixed_header
    }

    /// Bytes after the fixed header
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Length of the frame on the wire, fixed header included
    pub fn encoded_length(&self) -> u32 {
        self.fixed_header.encoded_length() + self.fixed_header.remaining_length()
    }

    /// Decodes the frame as a packet sent by a server
    pub fn parse(&self) -> Result<VariablePacket<'_>, Error> {
        VariablePacket::parse(
            self.fixed_header.packet_type(),
            self.fixed_header.flags(),
            &self.payload,
        )
    }

    /// Asynchronously read a single frame from an AsyncRead type, such as a
    /// network socket.
    #[cfg(feature = "parse")]
    pub async fn read_from<A: AsyncRead + Unpin>(rdr: &mut A) -> Result<Self, Error> {
        let fixed_header = FixedHeader::parse(rdr).await?;

        let length = fixed_header.remaining_length() as usize;
        let mut payload = Vec::new();
        (&mut *rdr)
            .take(length as u64)
            .read_to_end(&mut payload)
            .await?;
        if payload.len() < length {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }

        Ok(Self {
            fixed_header,
            payload: Bytes::from(payload),
        })
    }
}

impl Display for RawPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{fixed_header: {}, payload: {} bytes}}",
            self.fixed_header,
            self.payload.len()
        )
    }
}
