//! Variable header in MQTT

pub use self::connect_ret_code::ConnectReturnCode;

mod connect_ret_code;
