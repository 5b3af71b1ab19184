//! PUBCOMP

packet_identifier_packet! {
    /// `PUBCOMP` packet
    PubcompPacket => PublishComplete
}
