use super::{
    engagement::EngagementState,
    input::{AutothrustInput, ModeRequest},
    levers::{ThrustLevers, CLB_DETENT, MCT_DETENT, TOGA_DETENT},
    output::{AutothrustMode, AutothrustModeMessage, AutothrustStatus},
    parameters::AutothrustParameters,
};
use log::debug;
use systems::shared::logic::{ConfirmationNode, TimeSinceConditionNode};
use uom::si::{length::foot, velocity::{foot_per_minute, knot}};

/// Selects the autothrust mode by priority. The selected mode is only shown once the autothrust
/// has been engaged for the mode guard time.
pub(super) struct ModeSelection {
    mode: AutothrustMode,
    alpha_floor_latched: bool,
    engaged_time: TimeSinceConditionNode,
}

impl ModeSelection {
    pub fn new() -> Self {
        Self {
            mode: AutothrustMode::None,
            alpha_floor_latched: false,
            engaged_time: TimeSinceConditionNode::new(),
        }
    }

    /// Returns the guarded mode. The unguarded mode is available through `selected_mode`.
    pub fn update<const ENGINES: usize>(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        engagement: &EngagementState,
        parameters: &AutothrustParameters,
    ) -> AutothrustMode {
        let status = engagement.status;
        self.alpha_floor_latched = engagement.alpha_floor_active
            || (status != AutothrustStatus::Disengaged && self.alpha_floor_latched);

        let mode = self.select(input, levers, engagement).unwrap_or(self.mode);
        if mode != self.mode {
            debug!("A/THR mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;

        let engaged_time = self
            .engaged_time
            .update(status != AutothrustStatus::Disengaged, input.delta);
        if engaged_time >= parameters.mode_guard_time() {
            self.mode
        } else {
            AutothrustMode::None
        }
    }

    pub fn selected_mode(&self) -> AutothrustMode {
        self.mode
    }

    /// `None` keeps the previously selected mode.
    fn select<const ENGINES: usize>(
        &self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        engagement: &EngagementState,
    ) -> Option<AutothrustMode> {
        let armed = engagement.status == AutothrustStatus::EngagedArmed;
        let active = engagement.status == AutothrustStatus::EngagedActive;
        let request = input.mode_requested;
        let climb_mct_requested = active && request == ModeRequest::ThrustClimbMct;
        let all_operative = levers.all_engines_operative();
        let highest = levers.highest();

        let mode = if engagement.status == AutothrustStatus::Disengaged {
            AutothrustMode::None
        } else if engagement.alpha_floor_active {
            AutothrustMode::AlphaFloor
        } else if self.alpha_floor_latched {
            AutothrustMode::TogaLk
        } else if armed && levers.any_at(TOGA_DETENT) {
            AutothrustMode::ManToga
        } else if armed && engagement.flex_active && highest == MCT_DETENT {
            AutothrustMode::ManFlex
        } else if armed && levers.any_at(MCT_DETENT) {
            AutothrustMode::ManMct
        } else if climb_mct_requested && levers.engine_out() && levers.in_autothrust_detent() {
            AutothrustMode::ThrMct
        } else if climb_mct_requested && all_operative && highest == CLB_DETENT {
            AutothrustMode::ThrClb
        } else if climb_mct_requested
            && ((all_operative && levers.all(|angle| angle < CLB_DETENT))
                || (levers.engine_out() && levers.any_operative(|angle| angle < MCT_DETENT)))
        {
            AutothrustMode::ThrLvr
        } else if armed
            && ((all_operative && highest > CLB_DETENT && highest < MCT_DETENT)
                || (highest > MCT_DETENT && highest < TOGA_DETENT))
        {
            AutothrustMode::ManThr
        } else if active
            && (request == ModeRequest::ThrustIdle || request == ModeRequest::Retard)
        {
            AutothrustMode::ThrIdle
        } else if active && request == ModeRequest::SpeedMach {
            if input.discretes.mach_mode_active {
                AutothrustMode::Mach
            } else {
                AutothrustMode::Speed
            }
        } else {
            return None;
        };

        Some(mode)
    }
}

/// Latches THR LK when the autothrust disengages other than by the instinctive disconnect while
/// the levers are in the autothrust detent. Thrust then stays locked until a lever moves out of
/// the CLB and MCT detents.
pub(super) struct ThrustLock {
    locked: bool,
    previous_status: AutothrustStatus,
}

impl ThrustLock {
    pub fn new() -> Self {
        Self {
            locked: false,
            previous_status: AutothrustStatus::Disengaged,
        }
    }

    pub fn update<const ENGINES: usize>(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        status: AutothrustStatus,
    ) -> bool {
        let disengaged = status == AutothrustStatus::Disengaged;
        let lock = disengaged
            && self.previous_status != AutothrustStatus::Disengaged
            && !input.discretes.athr_disconnect
            && levers.in_autothrust_detent();
        let hold = self.locked && disengaged && levers.any_in_climb_or_mct_detent();

        self.locked = lock || hold;
        self.previous_status = status;

        self.locked
    }
}

pub(super) fn mode_message<const ENGINES: usize>(
    input: &AutothrustInput<ENGINES>,
    levers: &ThrustLevers<ENGINES>,
    engagement: &EngagementState,
    selected_mode: AutothrustMode,
    thrust_reduction_inhibited: bool,
    thrust_locked: bool,
) -> AutothrustModeMessage {
    let discretes = &input.discretes;
    let altitude = input.indicated_altitude.get::<foot>();
    let tcas_rate_low = input.tcas_ra_target_rate.get::<foot_per_minute>() <= 500.;

    let reduction_reached = (!discretes.srs_to_active
        || (altitude >= input.thrust_reduction_altitude.get::<foot>()
            && !thrust_reduction_inhibited))
        && (!discretes.srs_ga_active
            || (altitude >= input.thrust_reduction_altitude_go_around.get::<foot>()
                && !thrust_reduction_inhibited))
        && (input.radio_altitude.get::<foot>() > 400. || input.flight_phase > 2)
        && (!discretes.tcas_active || tcas_rate_low || levers.any(|angle| angle <= CLB_DETENT));
    let tcas_requires_climb = discretes.tcas_active
        && altitude < input.thrust_reduction_altitude.get::<foot>()
        && (input.indicated_airspeed.get::<knot>() > input.maximum_speed.get::<knot>() - 20.
            || tcas_rate_low);

    let lever_advisory_possible = engagement.status != AutothrustStatus::Disengaged
        && selected_mode != AutothrustMode::AlphaFloor
        && selected_mode != AutothrustMode::TogaLk
        && !engagement.on_ground;

    if lever_advisory_possible
        && (reduction_reached || tcas_requires_climb)
        && levers.all_engines_operative()
        && (levers.all(|angle| angle < CLB_DETENT) || levers.any(|angle| angle > CLB_DETENT))
    {
        AutothrustModeMessage::LvrClb
    } else if lever_advisory_possible
        && reduction_reached
        && levers.engine_out()
        && !levers.any_at(MCT_DETENT)
    {
        AutothrustModeMessage::LvrMct
    } else if engagement.status == AutothrustStatus::EngagedActive
        && levers.all_engines_operative()
        && levers.any_at(CLB_DETENT)
        && !levers.all_at(CLB_DETENT)
    {
        AutothrustModeMessage::LvrAsym
    } else if thrust_locked {
        AutothrustModeMessage::ThrLk
    } else {
        AutothrustModeMessage::None
    }
}

/// Warns when the levers are left between detents during takeoff.
pub(super) struct LeverWarnings {
    in_mct_detent: ConfirmationNode,
    between_climb_and_mct: ConfirmationNode,
}

impl LeverWarnings {
    pub fn new(parameters: &AutothrustParameters) -> Self {
        Self {
            in_mct_detent: ConfirmationNode::new_leading(parameters.toga_lever_warning_time()),
            between_climb_and_mct: ConfirmationNode::new_leading(
                parameters.flex_lever_warning_time(),
            ),
        }
    }

    /// Returns the FLEX and TOGA warnings.
    pub fn update<const ENGINES: usize>(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        flex_active: bool,
    ) -> (bool, bool) {
        let in_mct_detent = self
            .in_mct_detent
            .update(levers.any_at(MCT_DETENT), input.delta);
        let between_climb_and_mct = self.between_climb_and_mct.update(
            levers.any(|angle| (CLB_DETENT..MCT_DETENT).contains(&angle)),
            input.delta,
        );

        let flex = flex_active && between_climb_and_mct;
        let toga = !flex_active && (in_mct_detent || between_climb_and_mct);

        (flex, toga)
    }
}
