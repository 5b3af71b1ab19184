pub use self::{
    encodable::{take, Decodable, Encodable, VarBytes, VarInt, MAX_REMAINING_LENGTH},
    qos::QualityOfService,
    variable_header::*,
};

pub mod encodable;
pub mod qos;
pub mod variable_header;
