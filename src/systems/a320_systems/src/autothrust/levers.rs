use super::input::AutothrustInput;
use uom::si::angle::degree;

pub(super) const IDLE_DETENT: f64 = 0.;
pub(super) const CLB_DETENT: f64 = 25.;
pub(super) const MCT_DETENT: f64 = 35.;
pub(super) const TOGA_DETENT: f64 = 45.;

/// The thrust lever angles in degrees together with which engines are operative. Detent
/// positions are compared exactly, the levers report the detent angle when latched in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ThrustLevers<const ENGINES: usize> {
    angles: [f64; ENGINES],
    operative: [bool; ENGINES],
}

impl<const ENGINES: usize> ThrustLevers<ENGINES> {
    pub fn new(angles: [f64; ENGINES], operative: [bool; ENGINES]) -> Self {
        Self { angles, operative }
    }

    pub fn angles(&self) -> &[f64; ENGINES] {
        &self.angles
    }

    pub fn all(&self, predicate: impl Fn(f64) -> bool) -> bool {
        self.angles.iter().all(|&angle| predicate(angle))
    }

    pub fn any(&self, predicate: impl Fn(f64) -> bool) -> bool {
        self.angles.iter().any(|&angle| predicate(angle))
    }

    pub fn all_at(&self, detent: f64) -> bool {
        self.all(|angle| angle == detent)
    }

    pub fn any_at(&self, detent: f64) -> bool {
        self.any(|angle| angle == detent)
    }

    /// Whether any lever of an operative engine satisfies the predicate.
    pub fn any_operative(&self, predicate: impl Fn(f64) -> bool) -> bool {
        self.angles
            .iter()
            .zip(self.operative.iter())
            .any(|(&angle, &operative)| operative && predicate(angle))
    }

    pub fn highest(&self) -> f64 {
        self.angles
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn all_engines_operative(&self) -> bool {
        self.operative.iter().all(|&operative| operative)
    }

    pub fn any_engine_operative(&self) -> bool {
        self.operative.iter().any(|&operative| operative)
    }

    /// At least one engine is inoperative while another still runs.
    pub fn engine_out(&self) -> bool {
        !self.all_engines_operative() && self.any_engine_operative()
    }

    /// The range in which the autothrust may actively control thrust: up to CLB with all engines
    /// operative, up to MCT on any operative engine otherwise.
    pub fn in_active_range(&self) -> bool {
        if self.all_engines_operative() {
            self.all(|angle| (IDLE_DETENT..=CLB_DETENT).contains(&angle))
        } else {
            self.any_operative(|angle| (IDLE_DETENT..=MCT_DETENT).contains(&angle))
        }
    }

    /// The levers are in the detent used for autothrust operation: CLB with all engines
    /// operative, MCT with an engine out.
    pub fn in_autothrust_detent(&self) -> bool {
        (self.all_engines_operative() && self.all_at(CLB_DETENT))
            || (self.engine_out()
                && self.any_operative(|angle| angle == MCT_DETENT)
                && self.all(|angle| angle <= MCT_DETENT))
    }

    /// Any lever is in the CLB or MCT detent.
    pub fn any_in_climb_or_mct_detent(&self) -> bool {
        self.any(|angle| angle == CLB_DETENT || angle == MCT_DETENT)
    }

    /// All levers are back at idle and at least one of them just got there.
    pub fn pulled_to_idle(&self, previous: &ThrustLevers<ENGINES>) -> bool {
        self.all_at(IDLE_DETENT) && previous.any(|angle| angle > IDLE_DETENT)
    }
}

impl<const ENGINES: usize> From<&AutothrustInput<ENGINES>> for ThrustLevers<ENGINES> {
    fn from(input: &AutothrustInput<ENGINES>) -> Self {
        let mut angles = [0.; ENGINES];
        for (angle, tla) in angles.iter_mut().zip(input.thrust_lever_angle.iter()) {
            *angle = tla.get::<degree>();
        }

        Self::new(angles, input.engine_operative)
    }
}
