//! MQTT v3.1.1 packet codec for the client side of a connection
//!
//! Strictly implements the wire format of
//! [MQTT v3.1.1](http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html).
//! Packets a server sends are decoded, packets a client sends are encoded.
//! Decoded packets borrow topics and payloads from the input buffer.
//!
//! ## Usage
//!
//! ```rust
//! use mqtt_client_codec::common::QualityOfService;
//! use mqtt_client_codec::v4::packet::{PublishPacket, VariablePacket};
//!
//! // Encode a publish a client sends
//! let mut packet = PublishPacket::new(b"mqtt/learning", QualityOfService::Level1, b"Hello MQTT!");
//! packet.set_packet_identifier(Some(10));
//!
//! let mut buf = Vec::new();
//! VariablePacket::Publish(packet).serialize(&mut buf).unwrap();
//!
//! // Decode a whole frame, header included
//! let (decoded, consumed) = VariablePacket::decode(&buf).unwrap();
//! assert_eq!(consumed, buf.len());
//! assert_eq!(VariablePacket::Publish(packet), decoded);
//! ```

#[allow(unused_macros)]
macro_rules! trace { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        log::trace!($($x)*)
    }
) }

#[allow(unused_macros)]
macro_rules! debug { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        log::debug!($($x)*)
    }
) }

pub mod common;
mod error;
pub mod v4;

pub use error::Error;
