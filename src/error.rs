use core::fmt;

use crate::io::Pull;

/// Everything that can go wrong while bringing the intersection up.
///
/// There is no runtime error type: once the pins are configured, writes to
/// them cannot fail in a way software could notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    InvalidPin(u8),
    DuplicatePin(u8),
    // F1 ports only pull inputs.
    UnsupportedPull(Pull),
    InvalidTiming(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPin(pin) => write!(f, "pin {pin} does not exist on this port"),
            ConfigError::DuplicatePin(pin) => write!(f, "pin {pin} is mapped more than once"),
            ConfigError::UnsupportedPull(pull) => {
                write!(f, "pull {pull:?} is not supported on an output")
            }
            ConfigError::InvalidTiming(reason) => write!(f, "invalid timing: {reason}"),
        }
    }
}
