/*
 * The simulated traffic.
 *
 * There are no sensors: vehicles arrive at random on every tick, and leave at
 * random while their direction has green. The model owns the vehicle counts
 * and the random generator, and keeps every count within
 * `0..=MAX_TRAFFIC`.
 */

use enum_ordinalize::Ordinalize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{MAX_ARRIVALS, MAX_DISCHARGE, MAX_TRAFFIC, TRAFFIC_HIGH, TRAFFIC_LOW};
use crate::io::DirectionPair;

pub type SimRng = ChaCha8Rng;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadLevel {
    Low,
    Moderate,
    Heavy,
}

pub struct TrafficModel<R> {
    counts: [u8; DirectionPair::VARIANT_COUNT],
    rng: R,
}

impl TrafficModel<SimRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SimRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrafficModel<R> {
    pub fn new(rng: R) -> Self {
        Self::with_counts(rng, 0, 0)
    }

    pub fn with_counts(rng: R, north_south: u8, east_west: u8) -> Self {
        let mut counts = [0; DirectionPair::VARIANT_COUNT];
        counts[DirectionPair::NorthSouth.ordinal()] = north_south.min(MAX_TRAFFIC);
        counts[DirectionPair::EastWest.ordinal()] = east_west.min(MAX_TRAFFIC);
        Self { counts, rng }
    }

    pub fn count(&self, pair: DirectionPair) -> u8 {
        self.counts[pair.ordinal()]
    }

    // North-south is drawn first.
    pub fn generate_arrivals(&mut self) {
        for pair in DirectionPair::VARIANTS {
            let arrivals: u8 = self.rng.gen_range(0..=MAX_ARRIVALS);
            let count = &mut self.counts[pair.ordinal()];
            *count = count.saturating_add(arrivals).min(MAX_TRAFFIC);
        }
    }

    /// Let up to `MAX_DISCHARGE` vehicles of `pair` through, returning how many
    /// actually left. Only meaningful while `pair` has green. An empty queue
    /// does not consume a draw.
    pub fn discharge(&mut self, pair: DirectionPair) -> u8 {
        let count = self.counts[pair.ordinal()];
        if count == 0 {
            return 0;
        }

        let moving = self.rng.gen_range(0..=MAX_DISCHARGE).min(count);
        self.counts[pair.ordinal()] = count - moving;
        moving
    }

    pub fn is_low(&self, pair: DirectionPair) -> bool {
        self.count(pair) <= TRAFFIC_LOW
    }

    pub fn is_high(&self, pair: DirectionPair) -> bool {
        !self.is_low(pair)
    }

    pub fn load_level(&self, pair: DirectionPair) -> LoadLevel {
        match self.count(pair) {
            count if count <= TRAFFIC_LOW => LoadLevel::Low,
            count if count <= TRAFFIC_HIGH => LoadLevel::Moderate,
            _ => LoadLevel::Heavy,
        }
    }
}
