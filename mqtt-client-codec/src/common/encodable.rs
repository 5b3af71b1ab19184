use std::io::{self, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::Error;

/// Largest value the remaining length field can carry (4 bytes, 7 bits each).
pub const MAX_REMAINING_LENGTH: u32 = 268_435_455;

pub trait Encodable {
    /// Encodes to writer
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()>;
    /// Length of bytes after encoded
    fn encoded_length(&self) -> u32;
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(this) = self {
            this.encode(writer)?
        }
        Ok(())
    }

    fn encoded_length(&self) -> u32 {
        self.as_ref().map_or(0, |x| x.encoded_length())
    }
}

/// Raw bytes, written as is without a length prefix
impl Encodable for &[u8] {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self)
    }

    fn encoded_length(&self) -> u32 {
        u32::try_from(self.len()).unwrap_or(u32::MAX)
    }
}

/// Methods for decoding an object from the front of a borrowed buffer.
///
/// The reader is advanced past the consumed bytes. Anything borrowed by the
/// decoded value points into the original buffer.
pub trait Decodable<'a>: Sized {
    type Cond;

    /// Decodes object from reader
    fn decode(reader: &mut &'a [u8]) -> Result<Self, Error>
    where
        Self::Cond: Default,
    {
        Self::decode_with(reader, Default::default())
    }

    /// Decodes object with additional data (or hints)
    fn decode_with(reader: &mut &'a [u8], cond: Self::Cond) -> Result<Self, Error>;
}

/// Splits `len` bytes off the front of `reader`.
pub fn take<'a>(reader: &mut &'a [u8], len: usize) -> io::Result<&'a [u8]> {
    let buf: &'a [u8] = *reader;
    if buf.len() < len {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    let (head, tail) = buf.split_at(len);
    *reader = tail;
    Ok(head)
}

/// Bytes that encoded with a two bytes big endian length
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub struct VarBytes<'a>(pub &'a [u8]);

impl Encodable for VarBytes<'_> {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        debug_assert!(self.0.len() <= u16::MAX as usize);
        writer.write_u16::<BigEndian>(self.0.len() as u16)?;
        writer.write_all(self.0)
    }

    fn encoded_length(&self) -> u32 {
        u32::try_from(self.0.len()).map_or(u32::MAX, |len| len.saturating_add(2))
    }
}

impl<'a> Decodable<'a> for VarBytes<'a> {
    type Cond = ();

    fn decode_with(reader: &mut &'a [u8], _: ()) -> Result<Self, Error> {
        let length = reader.read_u16::<BigEndian>()?;
        Ok(Self(take(reader, length as usize)?))
    }
}

/// Remaining length, a base-128 integer of one to four bytes, least
/// significant digit first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarInt(u32);

impl VarInt {
    pub fn new(value: u32) -> Result<Self, Error> {
        if value > MAX_REMAINING_LENGTH {
            return Err(Error::PacketTooBig(value));
        }
        Ok(Self(value))
    }

    /// Number of bytes needed to encode `value`
    pub fn required_length(value: u32) -> Result<u32, Error> {
        VarInt::new(value).map(|v| v.encoded_length())
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Encodable for VarInt {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut value = self.0;
        for _ in 0..4 {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value > 0 {
                byte |= 0x80;
            }
            writer.write_u8(byte)?;
            if value == 0 {
                break;
            }
        }
        Ok(())
    }

    fn encoded_length(&self) -> u32 {
        if self.0 >= 2_097_152 {
            4
        } else if self.0 >= 16_384 {
            3
        } else if self.0 >= 128 {
            2
        } else {
            1
        }
    }
}

impl<'a> Decodable<'a> for VarInt {
    type Cond = ();

    fn decode_with(reader: &mut &'a [u8], _cond: ()) -> Result<Self, Error> {
        let mut value = 0u32;
        for i in 0..4 {
            let byte = reader.read_u8()?;
            value |= u32::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(Self(value));
            }
        }
        Err(Error::InvalidLength)
    }
}
