//! CONNACK

use crate::{
    common::{ConnackFlags, Decodable},
    v4::{control::variable_header::ConnectReturnCode, packet::DecodablePacket},
    Error,
};

/// `CONNACK` packet
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct ConnackPacket {
    flags: ConnackFlags,
    ret_code: ConnectReturnCode,
}

impl ConnackPacket {
    pub fn new(session_present: bool, ret_code: ConnectReturnCode) -> ConnackPacket {
        ConnackPacket {
            flags: ConnackFlags { session_present },
            ret_code,
        }
    }

    pub fn connack_flags(&self) -> ConnackFlags {
        self.flags
    }

    pub fn session_present(&self) -> bool {
        self.flags.session_present
    }

    pub fn connect_return_code(&self) -> ConnectReturnCode {
        self.ret_code
    }
}

impl<'a> DecodablePacket<'a> for ConnackPacket {
    fn decode_packet(mut payload: &'a [u8], _flags: u8) -> Result<Self, Error> {
        let flags = ConnackFlags::decode(&mut payload)?;
        let ret_code = ConnectReturnCode::decode(&mut payload)?;

        Ok(ConnackPacket { flags, ret_code })
    }
}
