use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

use crate::common::Encodable;

/// Keep alive time interval, in seconds
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct KeepAlive(pub u16);

impl Encodable for KeepAlive {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<BigEndian>(self.0)
    }

    fn encoded_length(&self) -> u32 {
        2
    }
}
