//! UNSUBACK

packet_identifier_packet! {
    /// `UNSUBACK` packet
    UnsubackPacket
}
