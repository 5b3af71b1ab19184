pub use self::{
    fixed_header::{decode_header, FixedHeader},
    packet_type::PacketType,
    variable_header::*,
};

pub mod fixed_header;
pub mod packet_type;
pub mod variable_header;
