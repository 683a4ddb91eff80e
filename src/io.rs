/*
 * The I/O module for the intersection.
 *
 * This module describes the output pins of the intersection without knowing
 * which device they live on. The `PinDriver` trait is the seam: the controller
 * only ever asks for a masked write, and the device-specific `stm32` submodule
 * turns that into a single register store. The pin map translates the logical
 * lights (north red, east-west load indicator, ...) into pin numbers on the
 * port.
 */

#[cfg(feature = "firmware")]
pub mod stm32;

use core::ops::{BitOr, BitOrAssign};
use enum_ordinalize::Ordinalize;

use crate::error::ConfigError;

#[derive(Ordinalize, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum DirectionPair {
    NorthSouth,
    EastWest,
}

impl DirectionPair {
    pub fn conflicting(self) -> DirectionPair {
        match self {
            DirectionPair::NorthSouth => DirectionPair::EastWest,
            DirectionPair::EastWest => DirectionPair::NorthSouth,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Red,
    Yellow,
    Green,
}

/// A set of pins on one port, bit `n` standing for pin `n`.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMask(u16);

pub const PORT_WIDTH: u8 = 16;

impl PinMask {
    pub const EMPTY: PinMask = PinMask(0);

    pub const fn from_bits(bits: u16) -> Self {
        PinMask(bits)
    }

    pub const fn pin(pin: u8) -> Self {
        PinMask(1 << pin)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: PinMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersection(self, other: PinMask) -> PinMask {
        PinMask(self.0 & other.0)
    }

    pub const fn difference(self, other: PinMask) -> PinMask {
        PinMask(self.0 & !other.0)
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..PORT_WIDTH).filter(move |pin| self.0 & (1 << pin) != 0)
    }
}

impl BitOr for PinMask {
    type Output = PinMask;

    fn bitor(self, rhs: PinMask) -> PinMask {
        PinMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for PinMask {
    fn bitor_assign(&mut self, rhs: PinMask) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    PushPull,
    OpenDrain,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputConfig {
    pub drive: Drive,
    pub speed: Speed,
    pub pull: Pull,
}

impl OutputConfig {
    // LEDs need nothing more.
    pub const DEFAULT: OutputConfig = OutputConfig {
        drive: Drive::PushPull,
        speed: Speed::Low,
        pull: Pull::None,
    };
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Digital outputs of one port.
///
/// Writes return nothing: a pin that does not follow a register write is a
/// hardware fault, and there is nothing the controller could do about it.
pub trait PinDriver {
    /// Make every pin in `pins` an output. Fails without touching any pin if
    /// one of them is not available or the port can't do `config`.
    fn configure(&mut self, pins: PinMask, config: OutputConfig) -> Result<(), ConfigError>;

    /// Drive `set` high and `clear` low in one store. A pin in both masks
    /// ends up high.
    fn write(&mut self, set: PinMask, clear: PinMask);

    fn set(&mut self, pins: PinMask) {
        self.write(pins, PinMask::EMPTY);
    }

    fn clear(&mut self, pins: PinMask) {
        self.write(PinMask::EMPTY, pins);
    }
}

// The two approaches of a direction pair always show the same color.
#[derive(Ordinalize, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum LightPin {
    NorthRed,
    NorthYellow,
    NorthGreen,

    SouthRed,
    SouthYellow,
    SouthGreen,

    EastRed,
    EastYellow,
    EastGreen,

    WestRed,
    WestYellow,
    WestGreen,

    // load indicators
    NsLoad,
    EwLoad,
    BothLoad,
}

impl LightPin {
    pub fn lamps(pair: DirectionPair, color: Color) -> [LightPin; 2] {
        match (pair, color) {
            (DirectionPair::NorthSouth, Color::Red) => [LightPin::NorthRed, LightPin::SouthRed],
            (DirectionPair::NorthSouth, Color::Yellow) => {
                [LightPin::NorthYellow, LightPin::SouthYellow]
            }
            (DirectionPair::NorthSouth, Color::Green) => {
                [LightPin::NorthGreen, LightPin::SouthGreen]
            }
            (DirectionPair::EastWest, Color::Red) => [LightPin::EastRed, LightPin::WestRed],
            (DirectionPair::EastWest, Color::Yellow) => {
                [LightPin::EastYellow, LightPin::WestYellow]
            }
            (DirectionPair::EastWest, Color::Green) => [LightPin::EastGreen, LightPin::WestGreen],
        }
    }
}

/// Fixed association of logical outputs to pin numbers, indexed by
/// `LightPin::ordinal()`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct PinMap {
    pins: [u8; LightPin::VARIANT_COUNT],
}

impl PinMap {
    pub const PORT_A: PinMap = PinMap {
        pins: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
    };

    pub fn new(pins: [u8; LightPin::VARIANT_COUNT]) -> Result<Self, ConfigError> {
        let mut used = PinMask::EMPTY;
        for &pin in pins.iter() {
            if pin >= PORT_WIDTH {
                return Err(ConfigError::InvalidPin(pin));
            }
            if used.contains(PinMask::pin(pin)) {
                return Err(ConfigError::DuplicatePin(pin));
            }
            used |= PinMask::pin(pin);
        }
        Ok(PinMap { pins })
    }

    pub fn pin(&self, light: LightPin) -> PinMask {
        PinMask::pin(self.pins[light.ordinal()])
    }

    pub fn lamps(&self, pair: DirectionPair, color: Color) -> PinMask {
        let [a, b] = LightPin::lamps(pair, color);
        self.pin(a) | self.pin(b)
    }

    pub fn pair_lamps(&self, pair: DirectionPair) -> PinMask {
        self.lamps(pair, Color::Red)
            | self.lamps(pair, Color::Yellow)
            | self.lamps(pair, Color::Green)
    }

    pub fn indicators(&self) -> PinMask {
        self.pin(LightPin::NsLoad) | self.pin(LightPin::EwLoad) | self.pin(LightPin::BothLoad)
    }

    pub fn all(&self) -> PinMask {
        LightPin::VARIANTS
            .iter()
            .fold(PinMask::EMPTY, |mask, &light| mask | self.pin(light))
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::PORT_A
    }
}
