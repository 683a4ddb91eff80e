/*
 * Fixed configuration of the intersection.
 *
 * None of this is tunable at runtime; it is checked once by
 * `Intersection::start` and read-only from then on.
 */

use crate::error::ConfigError;
use crate::io::OutputConfig;

pub const MAX_TRAFFIC: u8 = 30;
/// A direction with at most this many vehicles waiting counts as low traffic.
pub const TRAFFIC_LOW: u8 = 5;
/// Above this many vehicles a direction counts as heavy traffic.
pub const TRAFFIC_HIGH: u8 = 15;
pub const MAX_ARRIVALS: u8 = 2;
pub const MAX_DISCHARGE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick_ms: u32,
    pub green_ms: u32,
    /// Added to `green_ms` when the green direction still has traffic.
    pub extended_green_ms: u32,
    pub yellow_ms: u32,
}

impl Timing {
    pub const DEFAULT: Timing = Timing {
        tick_ms: 500,
        green_ms: 5000,
        extended_green_ms: 15000,
        yellow_ms: 2000,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidTiming("tick must be non-zero"));
        }
        for duration in [self.green_ms, self.extended_green_ms, self.yellow_ms] {
            if duration == 0 {
                return Err(ConfigError::InvalidTiming("phase duration must be non-zero"));
            }
            if duration % self.tick_ms != 0 {
                return Err(ConfigError::InvalidTiming(
                    "phase duration must be a multiple of the tick",
                ));
            }
        }
        Ok(())
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionConfig {
    pub timing: Timing,
    pub output: OutputConfig,
}

impl IntersectionConfig {
    pub const DEFAULT: IntersectionConfig = IntersectionConfig {
        timing: Timing::DEFAULT,
        output: OutputConfig::DEFAULT,
    };
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
