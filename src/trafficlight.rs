use crate::config::Timing;
use crate::io::{Color, DirectionPair};

/// The signal phases of the intersection. Exactly one direction pair is
/// active; the other one shows red throughout.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    NsGreen,
    NsGreenExtended,
    NsYellow,
    EwGreen,
    EwGreenExtended,
    EwYellow,
}

impl Phase {
    pub const INITIAL: Phase = Phase::NsGreen;

    /*
     * Determine the next phase, without changing the phase that we are in.
     *
     * `traffic_low` is whether the active pair had low traffic when this phase
     * ran out. Only the base green phases look at it.
     */
    pub fn next_phase(&self, traffic_low: bool) -> Phase {
        match (self, traffic_low) {
            (Phase::NsGreen, false) => Phase::NsGreenExtended,
            (Phase::NsGreen, true) => Phase::NsYellow,
            (Phase::NsGreenExtended, _) => Phase::NsYellow,
            (Phase::NsYellow, _) => Phase::EwGreen,
            (Phase::EwGreen, false) => Phase::EwGreenExtended,
            (Phase::EwGreen, true) => Phase::EwYellow,
            (Phase::EwGreenExtended, _) => Phase::EwYellow,
            (Phase::EwYellow, _) => Phase::NsGreen,
        }
    }

    /// Whether the extension is decided when this phase runs out.
    pub fn decides_extension(&self) -> bool {
        matches!(self, Phase::NsGreen | Phase::EwGreen)
    }

    pub fn active(&self) -> DirectionPair {
        match self {
            Phase::NsGreen | Phase::NsGreenExtended | Phase::NsYellow => DirectionPair::NorthSouth,
            Phase::EwGreen | Phase::EwGreenExtended | Phase::EwYellow => DirectionPair::EastWest,
        }
    }

    pub fn is_green(&self) -> bool {
        match self {
            Phase::NsGreen | Phase::NsGreenExtended | Phase::EwGreen | Phase::EwGreenExtended => {
                true
            }
            Phase::NsYellow | Phase::EwYellow => false,
        }
    }

    pub fn color(&self, pair: DirectionPair) -> Color {
        if pair != self.active() {
            Color::Red
        } else if self.is_green() {
            Color::Green
        } else {
            Color::Yellow
        }
    }

    pub fn duration_ms(&self, timing: &Timing) -> u32 {
        match self {
            Phase::NsGreen | Phase::EwGreen => timing.green_ms,
            Phase::NsGreenExtended | Phase::EwGreenExtended => timing.extended_green_ms,
            Phase::NsYellow | Phase::EwYellow => timing.yellow_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Phase; 6] = [
        Phase::NsGreen,
        Phase::NsGreenExtended,
        Phase::NsYellow,
        Phase::EwGreen,
        Phase::EwGreenExtended,
        Phase::EwYellow,
    ];

    #[test]
    fn pairs_never_move_together() {
        for phase in ALL {
            let ns = phase.color(DirectionPair::NorthSouth);
            let ew = phase.color(DirectionPair::EastWest);
            assert!(ns == Color::Red || ew == Color::Red, "{phase:?}: {ns:?} / {ew:?}");
            assert_ne!(ns, ew, "{phase:?}");
        }
    }

    #[test]
    fn transition_table() {
        assert_eq!(Phase::NsGreen.next_phase(false), Phase::NsGreenExtended);
        assert_eq!(Phase::NsGreen.next_phase(true), Phase::NsYellow);
        assert_eq!(Phase::EwGreen.next_phase(false), Phase::EwGreenExtended);
        assert_eq!(Phase::EwGreen.next_phase(true), Phase::EwYellow);
        for traffic_low in [false, true] {
            assert_eq!(Phase::NsGreenExtended.next_phase(traffic_low), Phase::NsYellow);
            assert_eq!(Phase::NsYellow.next_phase(traffic_low), Phase::EwGreen);
            assert_eq!(Phase::EwGreenExtended.next_phase(traffic_low), Phase::EwYellow);
            assert_eq!(Phase::EwYellow.next_phase(traffic_low), Phase::NsGreen);
        }
    }

    #[test]
    fn every_phase_is_reachable_from_the_initial_one() {
        let mut seen = Vec::new();
        let mut frontier = vec![Phase::INITIAL];
        while let Some(phase) = frontier.pop() {
            if seen.contains(&phase) {
                continue;
            }
            seen.push(phase);
            frontier.push(phase.next_phase(false));
            frontier.push(phase.next_phase(true));
        }
        assert_eq!(seen.len(), ALL.len());
    }

    #[test]
    fn only_base_greens_decide() {
        let deciding: Vec<Phase> = ALL.into_iter().filter(Phase::decides_extension).collect();
        assert_eq!(deciding, vec![Phase::NsGreen, Phase::EwGreen]);
    }

    #[test]
    fn colors_of_the_active_pair() {
        assert_eq!(Phase::NsGreenExtended.color(DirectionPair::NorthSouth), Color::Green);
        assert_eq!(Phase::NsYellow.color(DirectionPair::NorthSouth), Color::Yellow);
        assert_eq!(Phase::EwYellow.color(DirectionPair::EastWest), Color::Yellow);
        assert_eq!(Phase::EwGreen.color(DirectionPair::NorthSouth), Color::Red);
    }

    #[test]
    fn durations() {
        let timing = Timing::DEFAULT;
        assert_eq!(Phase::NsGreen.duration_ms(&timing), 5000);
        assert_eq!(Phase::EwGreenExtended.duration_ms(&timing), 15000);
        assert_eq!(Phase::NsYellow.duration_ms(&timing), 2000);
    }
}
