//! MQTT 3.1.1 control packets

pub mod control;
pub mod packet;
