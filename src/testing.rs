/*
 * Fakes for the host tests: a pin driver that remembers every write, a clock
 * that only counts, and a random source that plays back a script.
 */

use rand::RngCore;

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::io::{OutputConfig, PinDriver, PinMask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub set: PinMask,
    pub clear: PinMask,
}

pub struct RecordingPins {
    available: PinMask,
    pub configured: Vec<(PinMask, OutputConfig)>,
    pub writes: Vec<Write>,
    levels: PinMask,
}

impl RecordingPins {
    pub fn new() -> Self {
        Self::with_available(PinMask::from_bits(0xffff))
    }

    pub fn with_available(available: PinMask) -> Self {
        Self {
            available,
            configured: Vec::new(),
            writes: Vec::new(),
            levels: PinMask::EMPTY,
        }
    }

    pub fn is_high(&self, pins: PinMask) -> bool {
        self.levels.contains(pins)
    }

    pub fn is_low(&self, pins: PinMask) -> bool {
        self.levels.intersection(pins).is_empty()
    }
}

impl PinDriver for RecordingPins {
    fn configure(&mut self, pins: PinMask, config: OutputConfig) -> Result<(), ConfigError> {
        if let Some(missing) = pins.difference(self.available).iter().next() {
            return Err(ConfigError::InvalidPin(missing));
        }
        self.configured.push((pins, config));
        Ok(())
    }

    fn write(&mut self, set: PinMask, clear: PinMask) {
        self.writes.push(Write { set, clear });
        self.levels = self.levels.difference(clear) | set;
    }
}

#[derive(Default)]
pub struct SimClock {
    pub now_ms: u64,
    pub delays: Vec<u32>,
}

impl Clock for SimClock {
    async fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now_ms += u64::from(ms);
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Plays back the given words, then zeros forever.
pub struct ScriptedRng {
    script: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(script: &[u32]) -> Self {
        Self {
            script: script.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.script.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// The word that makes `gen_range(0..=range - 1)` on a small integer return
/// `value`. The range sampler multiplies the word by `range` and keeps the
/// high half.
pub fn draw(value: u32, range: u32) -> u32 {
    let word = (u64::from(value) << 32).div_ceil(u64::from(range));
    word as u32
}
