//! Connect flags byte
//!
//! ```plain
//! bit | 7        | 6        | 5           | 4 3      | 2         | 1             | 0
//!     | username | password | will retain | will QoS | will flag | clean session | reserved
//! ```

use std::io::{self, Write};

use byteorder::WriteBytesExt;

use crate::common::{Encodable, QualityOfService};

pub const CLEAN_SESSION: u8 = 0b0000_0010;
pub const WILL_FLAG: u8 = 0b0000_0100;
pub const WILL_QOS_MASK: u8 = 0b0001_1000;
pub const WILL_QOS_SHIFT: u8 = 3;
pub const WILL_RETAIN: u8 = 0b0010_0000;
pub const PASSWORD: u8 = 0b0100_0000;
pub const USERNAME: u8 = 0b1000_0000;

/// Flags for `CONNECT` packet. The reserved bit 0 is always written as zero.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct ConnectFlags {
    pub username: bool,
    pub password: bool,
    pub will_retain: bool,
    pub will_qos: QualityOfService,
    pub will_flag: bool,
    pub clean_session: bool,
}

impl ConnectFlags {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.clean_session {
            bits |= CLEAN_SESSION;
        }
        if self.will_flag {
            bits |= WILL_FLAG;
        }
        bits |= (u8::from(self.will_qos) << WILL_QOS_SHIFT) & WILL_QOS_MASK;
        if self.will_retain {
            bits |= WILL_RETAIN;
        }
        if self.password {
            bits |= PASSWORD;
        }
        if self.username {
            bits |= USERNAME;
        }
        bits
    }
}

impl Encodable for ConnectFlags {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.bits())
    }

    fn encoded_length(&self) -> u32 {
        1
    }
}
