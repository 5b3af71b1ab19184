use std::{
    fmt::Display,
    io::{self, Write},
};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    common::{Decodable, Encodable},
    Error,
};

/// Packet identifier
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct PacketIdentifier(pub u16);

impl Encodable for PacketIdentifier {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<BigEndian>(self.0)
    }

    fn encoded_length(&self) -> u32 {
        2
    }
}

impl<'a> Decodable<'a> for PacketIdentifier {
    type Cond = ();

    fn decode_with(reader: &mut &'a [u8], _rest: ()) -> Result<Self, Error> {
        Ok(Self(reader.read_u16::<BigEndian>()?))
    }
}

impl Display for PacketIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
