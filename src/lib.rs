#![cfg_attr(not(test), no_std)]

/*
 * Controller for a simulated four-way intersection.
 *
 * Everything that makes a decision lives in this library so that it can be
 * run on the host. The firmware binary only wires the STM32 port and the
 * Embassy timer into the controller.
 */

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod error;
pub mod indicators;
pub mod intersection;
pub mod io;
pub mod traffic;
pub mod trafficlight;

#[cfg(test)]
mod testing;

pub use clock::Clock;
pub use config::{IntersectionConfig, Timing};
pub use error::ConfigError;
pub use intersection::{Intersection, PhaseRun};
pub use io::{Color, DirectionPair, PinDriver, PinMap, PinMask};
pub use traffic::TrafficModel;
pub use trafficlight::Phase;
