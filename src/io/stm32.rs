/*
 * The device-specific part of the I/O: port A of the STM32F1.
 *
 * The pins are held as Embassy `Flex` pins so that they can be reconfigured
 * and stay configured for as long as the driver lives. Writes bypass the
 * per-pin API and go straight to the port's bit set/reset register, so that
 * all pins of a mask change in the same bus cycle.
 */

use embassy_stm32::gpio::{self, AnyPin, Flex};
use embassy_stm32::pac;

use super::{Drive, OutputConfig, PORT_WIDTH, PinDriver, PinMask, Pull, Speed};
use crate::error::ConfigError;

pub struct PortA {
    pins: [Option<Flex<'static>>; PORT_WIDTH as usize],
    configured: PinMask,
}

impl PortA {
    /// Takes the pins of port A that the board makes available; index `n` is
    /// PA`n`. Pins passed as `None` can't be configured.
    pub fn new(pins: [Option<AnyPin>; PORT_WIDTH as usize]) -> Self {
        Self {
            pins: pins.map(|pin| pin.map(Flex::new)),
            configured: PinMask::EMPTY,
        }
    }

    fn available(&self) -> PinMask {
        self.pins
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_some())
            .fold(PinMask::EMPTY, |mask, (n, _)| mask | PinMask::pin(n as u8))
    }
}

fn speed(speed: Speed) -> gpio::Speed {
    // The F1 ports top out at 50 MHz, which embassy calls `VeryHigh`.
    match speed {
        Speed::Low => gpio::Speed::Low,
        Speed::Medium => gpio::Speed::Medium,
        Speed::High | Speed::VeryHigh => gpio::Speed::VeryHigh,
    }
}

impl PinDriver for PortA {
    fn configure(&mut self, pins: PinMask, config: OutputConfig) -> Result<(), ConfigError> {
        if let Some(missing) = pins.difference(self.available()).iter().next() {
            return Err(ConfigError::InvalidPin(missing));
        }
        // The F1 family only has pull resistors on inputs.
        if config.pull != Pull::None {
            return Err(ConfigError::UnsupportedPull(config.pull));
        }

        for n in pins.iter() {
            if let Some(pin) = self.pins[n as usize].as_mut() {
                match config.drive {
                    Drive::PushPull => pin.set_as_output(speed(config.speed)),
                    Drive::OpenDrain => pin.set_as_input_output(speed(config.speed)),
                }
            }
        }
        self.configured |= pins;
        Ok(())
    }

    fn write(&mut self, set: PinMask, clear: PinMask) {
        let set = set.intersection(self.configured);
        let clear = clear.intersection(self.configured);
        // BSRR: the set half wins over the reset half for the same pin.
        pac::GPIOA.bsrr().write(|w| {
            for n in clear.iter() {
                w.set_br(n as usize, true);
            }
            for n in set.iter() {
                w.set_bs(n as usize, true);
            }
        });
    }
}
