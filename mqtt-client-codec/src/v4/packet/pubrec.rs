//! PUBREC

packet_identifier_packet! {
    /// `PUBREC` packet
    PubrecPacket => PublishReceived
}
