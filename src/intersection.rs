/*
 * The phase controller.
 *
 * A single loop owns everything: the pins, the clock and the traffic model.
 * Each phase is run as a number of fixed ticks. On every tick vehicles arrive,
 * the load indicators follow the new counts, vehicles leave if the active pair
 * has green, and then the loop sleeps until the next tick. The lamps are only
 * written when a phase is entered.
 *
 * Whether a green is extended is decided once, when the base green runs out,
 * from the count at that instant. It is not revisited during the extension.
 */

use rand::Rng;

use crate::clock::Clock;
use crate::config::{IntersectionConfig, Timing};
use crate::error::ConfigError;
use crate::indicators::LoadIndicators;
use crate::io::{DirectionPair, OutputConfig, PinDriver, PinMap};
use crate::traffic::TrafficModel;
use crate::trafficlight::Phase;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseRun {
    pub phase: Phase,
    pub duration_ms: u32,
    pub next: Phase,
}

pub struct Intersection<P, C, R> {
    pins: P,
    clock: C,
    traffic: TrafficModel<R>,
    map: PinMap,
    timing: Timing,
    output: OutputConfig,
    phase: Phase,
    elapsed_ms: u64,
}

impl<P: PinDriver, C: Clock, R: Rng> Intersection<P, C, R> {
    pub fn new(
        pins: P,
        clock: C,
        traffic: TrafficModel<R>,
        map: PinMap,
        config: IntersectionConfig,
    ) -> Result<Self, ConfigError> {
        // A zero tick would never let a phase end.
        config.timing.validate()?;
        Ok(Self {
            pins,
            clock,
            traffic,
            map,
            timing: config.timing,
            output: config.output,
            phase: Phase::INITIAL,
            elapsed_ms: 0,
        })
    }

    /// Configure the pins, switch everything off and show the initial phase.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        self.pins.configure(self.map.all(), self.output)?;
        self.pins.clear(self.map.all());

        info!("intersection starting in {} (tick {} ms)", self.phase, self.timing.tick_ms);
        self.enter(self.phase);
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn traffic(&self) -> &TrafficModel<R> {
        &self.traffic
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    // Conflicting pair to red first, then the active pair. Each pair gets one
    // write that clears its three colors and lights the new one.
    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        let active = phase.active();
        for pair in [active.conflicting(), active] {
            let lit = self.map.lamps(pair, phase.color(pair));
            self.pins.write(lit, self.map.pair_lamps(pair));
        }
        debug!(
            "entered {} (ns={}, ew={})",
            phase,
            self.traffic.count(DirectionPair::NorthSouth),
            self.traffic.count(DirectionPair::EastWest)
        );
    }

    pub async fn tick(&mut self) {
        self.traffic.generate_arrivals();
        LoadIndicators::from_traffic(&self.traffic).apply(&mut self.pins, &self.map);
        if self.phase.is_green() {
            self.traffic.discharge(self.phase.active());
        }
        trace!(
            "tick in {}: ns={} ew={}",
            self.phase,
            self.traffic.count(DirectionPair::NorthSouth),
            self.traffic.count(DirectionPair::EastWest)
        );

        self.clock.delay_ms(self.timing.tick_ms).await;
        self.elapsed_ms += u64::from(self.timing.tick_ms);
    }

    pub async fn run_phase(&mut self) -> PhaseRun {
        let phase = self.phase;
        let duration_ms = phase.duration_ms(&self.timing);
        for _ in 0..duration_ms / self.timing.tick_ms {
            self.tick().await;
        }

        let active = phase.active();
        let next = phase.next_phase(self.traffic.is_low(active));
        if phase.decides_extension() && next.is_green() {
            info!(
                "extending green for {}: {} vehicles waiting ({})",
                active,
                self.traffic.count(active),
                self.traffic.load_level(active)
            );
        }

        self.enter(next);
        PhaseRun {
            phase,
            duration_ms,
            next,
        }
    }

    // Only a reset gets us out of here.
    pub async fn run(&mut self) -> ! {
        loop {
            self.run_phase().await;
        }
    }
}
