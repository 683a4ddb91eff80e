/*
 * The load indicator LEDs.
 *
 * One LED per direction pair lights up when that pair has more than
 * `TRAFFIC_LOW` vehicles waiting, a third one when both do. The indicators
 * have no state of their own; they are recomputed from the traffic model on
 * every tick.
 */

use rand::Rng;

use crate::io::{DirectionPair, LightPin, PinDriver, PinMap, PinMask};
use crate::traffic::TrafficModel;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadIndicators {
    pub north_south_high: bool,
    pub east_west_high: bool,
    pub both_high: bool,
}

impl LoadIndicators {
    pub fn from_traffic<R: Rng>(traffic: &TrafficModel<R>) -> Self {
        let north_south_high = traffic.is_high(DirectionPair::NorthSouth);
        let east_west_high = traffic.is_high(DirectionPair::EastWest);
        Self {
            north_south_high,
            east_west_high,
            both_high: north_south_high && east_west_high,
        }
    }

    pub fn apply<P: PinDriver>(&self, pins: &mut P, map: &PinMap) {
        let mut set = PinMask::EMPTY;
        let mut clear = PinMask::EMPTY;
        for (light, on) in [
            (LightPin::NsLoad, self.north_south_high),
            (LightPin::EwLoad, self.east_west_high),
            (LightPin::BothLoad, self.both_high),
        ] {
            if on {
                set |= map.pin(light);
            } else {
                clear |= map.pin(light);
            }
        }
        pins.write(set, clear);
    }
}
