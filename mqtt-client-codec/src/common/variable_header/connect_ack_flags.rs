use std::fmt::Display;

use byteorder::ReadBytesExt;

use crate::{common::Decodable, Error};

const SESSION_PRESENT: u8 = 0b0000_0001;

/// Flags in `CONNACK` packet
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct ConnackFlags {
    pub session_present: bool,
}

impl<'a> Decodable<'a> for ConnackFlags {
    type Cond = ();

    fn decode_with(reader: &mut &'a [u8], _rest: ()) -> Result<Self, Error> {
        let code = reader.read_u8()?;
        if code & !SESSION_PRESENT != 0 {
            return Err(Error::InvalidReservedFlag);
        }

        Ok(Self {
            session_present: code & SESSION_PRESENT != 0,
        })
    }
}

impl Display for ConnackFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{session_present: {}}}", self.session_present)
    }
}
