//! QoS (Quality of Services)

use std::fmt::Display;

use crate::Error;

#[repr(u8)]
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Default)]
pub enum QualityOfService {
    #[default]
    Level0 = 0,
    Level1 = 1,
    Level2 = 2,
}

impl TryFrom<u8> for QualityOfService {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QualityOfService::Level0),
            1 => Ok(QualityOfService::Level1),
            2 => Ok(QualityOfService::Level2),
            qos => Err(Error::InvalidQoS(qos)),
        }
    }
}

impl From<QualityOfService> for u8 {
    fn from(qos: QualityOfService) -> Self {
        qos as u8
    }
}

impl Display for QualityOfService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
