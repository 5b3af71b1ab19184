use bytes::{Buf as _, BufMut as _, BytesMut};
use tokio_util::codec;

use crate::{
    common::MAX_REMAINING_LENGTH,
    v4::{
        control::{decode_header, FixedHeader},
        packet::{RawPacket, VariablePacket},
    },
    Error,
};

/// Splits a byte stream into [`RawPacket`] frames
#[derive(Debug)]
pub struct MqttDecoder {
    state: DecodeState,
    max_packet_size: u32,
}

#[derive(Debug)]
enum DecodeState {
    Start,
    Packet(FixedHeader),
}

impl MqttDecoder {
    pub const fn new() -> Self {
        Self::with_max_packet_size(MAX_REMAINING_LENGTH)
    }

    /// Frames whose remaining length exceeds `max_packet_size` are rejected
    /// with `PacketTooBig` as soon as their header is read.
    pub const fn with_max_packet_size(max_packet_size: u32) -> Self {
        MqttDecoder {
            state: DecodeState::Start,
            max_packet_size,
        }
    }

    pub fn max_packet_size(&self) -> u32 {
        self.max_packet_size
    }
}

impl Default for MqttDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl codec::Decoder for MqttDecoder {
    type Item = RawPacket;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match &self.state {
                DecodeState::Start => match decode_header(&src[..]) {
                    Some(Ok((header, header_size))) => {
                        let length = header.remaining_length();
                        if length > self.max_packet_size {
                            debug!(
                                "rejecting {} frame of {} bytes, limit is {}",
                                header.packet_type(),
                                length,
                                self.max_packet_size
                            );
                            return Err(Error::PacketTooBig(length));
                        }
                        src.advance(header_size);
                        src.reserve(length as usize);
                        self.state = DecodeState::Packet(header);
                        continue;
                    }
                    Some(Err(e)) => {
                        debug!("malformed fixed header: {}", e);
                        return Err(e);
                    }
                    None => return Ok(None),
                },
                DecodeState::Packet(header) => {
                    let header = *header;
                    let length = header.remaining_length() as usize;
                    if src.remaining() < length {
                        return Ok(None);
                    }

                    self.state = DecodeState::Start;
                    trace!("decoded frame {}", header);
                    let payload = src.split_to(length).freeze();
                    return RawPacket::new(header, payload).map(Some);
                }
            }
        }
    }
}

/// Writes client packets into the outgoing buffer
#[derive(Debug, Default)]
pub struct MqttEncoder {}

impl MqttEncoder {
    pub const fn new() -> Self {
        MqttEncoder {}
    }
}

impl<'a, T: Into<VariablePacket<'a>>> codec::Encoder<T> for MqttEncoder {
    type Error = Error;

    fn encode(&mut self, packet: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let packet = packet.into();
        let length = packet.serialized_length()?;
        dst.reserve(length as usize);
        trace!("encoding {} packet of {} bytes", packet.packet_type(), length);
        packet.serialize(&mut dst.writer())
    }
}

/// [`MqttDecoder`] and [`MqttEncoder`] over one transport
#[derive(Debug, Default)]
pub struct MqttCodec {
    decode: MqttDecoder,
    encode: MqttEncoder,
}

impl MqttCodec {
    pub const fn new() -> Self {
        MqttCodec {
            decode: MqttDecoder::new(),
            encode: MqttEncoder::new(),
        }
    }

    pub const fn with_max_packet_size(max_packet_size: u32) -> Self {
        MqttCodec {
            decode: MqttDecoder::with_max_packet_size(max_packet_size),
            encode: MqttEncoder::new(),
        }
    }
}

impl codec::Decoder for MqttCodec {
    type Item = RawPacket;
    type Error = Error;

    #[inline]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        codec::Decoder::decode(&mut self.decode, src)
    }
}

impl<'a, T: Into<VariablePacket<'a>>> codec::Encoder<T> for MqttCodec {
    type Error = Error;

    #[inline]
    fn encode(&mut self, packet: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        codec::Encoder::encode(&mut self.encode, packet, dst)
    }
}
