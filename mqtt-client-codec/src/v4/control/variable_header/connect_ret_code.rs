use std::fmt::Display;

use byteorder::ReadBytesExt;

use crate::{common::Decodable, Error};

pub const CONNECTION_ACCEPTED: u8 = 0x00;
pub const UNACCEPTABLE_PROTOCOL_VERSION: u8 = 0x01;
pub const IDENTIFIER_REJECTED: u8 = 0x02;
pub const SERVICE_UNAVAILABLE: u8 = 0x03;
pub const BAD_USERNAME_OR_PASSWORD: u8 = 0x04;
pub const NOT_AUTHORIZED: u8 = 0x05;

/// Return code for `CONNACK` packet. Codes outside 0-5 are kept as `Reserved`.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ConnectReturnCode {
    ConnectionAccepted,
    UnacceptableProtocolVersion,
    IdentifierRejected,
    ServiceUnavailable,
    BadUserNameOrPassword,
    NotAuthorized,
    Reserved(u8),
}

impl ConnectReturnCode {
    pub fn is_accepted(self) -> bool {
        self == ConnectReturnCode::ConnectionAccepted
    }
}

impl From<ConnectReturnCode> for u8 {
    fn from(value: ConnectReturnCode) -> Self {
        match value {
            ConnectReturnCode::ConnectionAccepted => CONNECTION_ACCEPTED,
            ConnectReturnCode::UnacceptableProtocolVersion => UNACCEPTABLE_PROTOCOL_VERSION,
            ConnectReturnCode::IdentifierRejected => IDENTIFIER_REJECTED,
            ConnectReturnCode::ServiceUnavailable => SERVICE_UNAVAILABLE,
            ConnectReturnCode::BadUserNameOrPassword => BAD_USERNAME_OR_PASSWORD,
            ConnectReturnCode::NotAuthorized => NOT_AUTHORIZED,
            ConnectReturnCode::Reserved(r) => r,
        }
    }
}

impl From<u8> for ConnectReturnCode {
    /// Create `ConnectReturnCode` from code
    fn from(code: u8) -> Self {
        match code {
            CONNECTION_ACCEPTED => ConnectReturnCode::ConnectionAccepted,
            UNACCEPTABLE_PROTOCOL_VERSION => ConnectReturnCode::UnacceptableProtocolVersion,
            IDENTIFIER_REJECTED => ConnectReturnCode::IdentifierRejected,
            SERVICE_UNAVAILABLE => ConnectReturnCode::ServiceUnavailable,
            BAD_USERNAME_OR_PASSWORD => ConnectReturnCode::BadUserNameOrPassword,
            NOT_AUTHORIZED => ConnectReturnCode::NotAuthorized,
            _ => ConnectReturnCode::Reserved(code),
        }
    }
}

impl<'a> Decodable<'a> for ConnectReturnCode {
    type Cond = ();

    fn decode_with(reader: &mut &'a [u8], _rest: ()) -> Result<Self, Error> {
        Ok(Self::from(reader.read_u8()?))
    }
}

impl Display for ConnectReturnCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectReturnCode::ConnectionAccepted => write!(f, "connection accepted"),
            ConnectReturnCode::UnacceptableProtocolVersion => {
                write!(f, "unacceptable protocol version")
            }
            ConnectReturnCode::IdentifierRejected => write!(f, "identifier rejected"),
            ConnectReturnCode::ServiceUnavailable => write!(f, "server unavailable"),
            ConnectReturnCode::BadUserNameOrPassword => write!(f, "bad user name or password"),
            ConnectReturnCode::NotAuthorized => write!(f, "not authorized"),
            ConnectReturnCode::Reserved(code) => write!(f, "reserved ({code:#04X})"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_codes() {
        for code in 0..=5u8 {
            let ret = ConnectReturnCode::from(code);
            assert!(!matches!(ret, ConnectReturnCode::Reserved(_)));
            assert_eq!(u8::from(ret), code);
        }
        assert!(ConnectReturnCode::from(0).is_accepted());
        assert_eq!(ConnectReturnCode::from(5), ConnectReturnCode::NotAuthorized);
    }

    #[test]
    fn out_of_range_codes_are_preserved() {
        let mut reader = &b"\x06"[..];
        let ret = ConnectReturnCode::decode(&mut reader).unwrap();
        assert_eq!(ret, ConnectReturnCode::Reserved(6));
        assert_eq!(u8::from(ret), 6);
        assert!(!ret.is_accepted());
        assert_eq!(ret.to_string(), "reserved (0x06)");
    }
}
