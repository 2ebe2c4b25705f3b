use super::{
    input::AutothrustInput,
    levers::{ThrustLevers, CLB_DETENT, MCT_DETENT, TOGA_DETENT},
    output::AutothrustStatus,
    parameters::AutothrustParameters,
};
use log::debug;
use systems::shared::{
    clamp,
    logic::{MemoryNode, TimeSinceConditionNode},
};
use uom::si::{f64::*, length::foot, ratio::ratio, thermodynamic_temperature::degree_celsius};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroundState {
    OnGround,
    InAir,
}

/// Determines whether the aircraft is on ground from the main gear strut compressions. The
/// aircraft only leaves the ground once both struts are fully extended.
pub(super) struct GroundDetection {
    state: GroundState,
}

impl GroundDetection {
    pub fn new() -> Self {
        Self {
            state: GroundState::OnGround,
        }
    }

    pub fn update(&mut self, strut_compression: &[Ratio; 2], threshold: f64) -> bool {
        let left = clamp(strut_compression[0].get::<ratio>(), 0., 1.);
        let right = clamp(strut_compression[1].get::<ratio>(), 0., 1.);

        self.state = match self.state {
            GroundState::OnGround if left == 0. && right == 0. => GroundState::InAir,
            GroundState::InAir if left > threshold || right > threshold => GroundState::OnGround,
            state => state,
        };

        self.is_on_ground()
    }

    pub fn is_on_ground(&self) -> bool {
        self.state == GroundState::OnGround
    }
}

/// The result of the engagement logic for a single step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct EngagementState {
    pub status: AutothrustStatus,
    pub on_ground: bool,
    pub athr_disabled: bool,
    /// A recognized push of the A/THR pushbutton.
    pub athr_push: bool,
    pub tla_in_active_range: bool,
    pub flex_active: bool,
    pub alpha_floor_inhibited: bool,
    /// The alpha floor condition is present and not inhibited.
    pub alpha_floor_active: bool,
}

/// Decides whether the autothrust is engaged and whether it actively controls thrust.
pub(super) struct Engagement<const ENGINES: usize> {
    ground: GroundDetection,

    disconnect_held: TimeSinceConditionNode,
    disabled: MemoryNode,

    push_released: TimeSinceConditionNode,
    push_memory: MemoryNode,
    previous_push: bool,

    flex_latch: MemoryNode,

    tcas_active_time: TimeSinceConditionNode,
    alpha_floor_inhibited: bool,
    previous_tcas_for_inhibit: bool,

    toga_latched: bool,
    toga_latched_time: TimeSinceConditionNode,
    previous_srs_to_ga: bool,

    engaged: bool,
    previous_levers: Option<ThrustLevers<ENGINES>>,
    previous_alpha_floor: bool,
    previous_tcas_for_engagement: bool,
    status: AutothrustStatus,
}

impl<const ENGINES: usize> Engagement<ENGINES> {
    pub fn new() -> Self {
        Self {
            ground: GroundDetection::new(),
            disconnect_held: TimeSinceConditionNode::new(),
            disabled: MemoryNode::new_reset_dominant(),
            push_released: TimeSinceConditionNode::new(),
            push_memory: MemoryNode::new_reset_dominant(),
            previous_push: false,
            flex_latch: MemoryNode::new_reset_dominant(),
            tcas_active_time: TimeSinceConditionNode::new(),
            alpha_floor_inhibited: false,
            previous_tcas_for_inhibit: false,
            toga_latched: false,
            toga_latched_time: TimeSinceConditionNode::new(),
            previous_srs_to_ga: false,
            engaged: false,
            previous_levers: None,
            previous_alpha_floor: false,
            previous_tcas_for_engagement: false,
            status: AutothrustStatus::Disengaged,
        }
    }

    pub fn update(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        parameters: &AutothrustParameters,
    ) -> EngagementState {
        let discretes = &input.discretes;
        let on_ground = self.ground.update(
            &input.gear_strut_compression,
            parameters.strut_compression_ground_threshold,
        );

        let disconnect_held = self
            .disconnect_held
            .update(discretes.athr_disconnect, input.delta);
        let athr_disabled = self.disabled.update(
            disconnect_held >= parameters.disconnect_disable_time(),
            discretes.athr_reset_disable,
        );

        let athr_push = self.update_push(input, parameters);
        let tla_in_active_range = levers.in_active_range();
        let flex_active = self.update_flex(input, levers, on_ground);
        self.update_alpha_floor_inhibit(input, levers, parameters);
        let toga_condition = self.update_toga_condition(input, parameters);

        let alpha_floor_condition = !self.alpha_floor_inhibited
            && discretes.alpha_floor_condition
            && !self.previous_alpha_floor;
        let previous_levers = self.previous_levers.unwrap_or(*levers);

        let engage = !athr_disabled
            && ((athr_push && !self.engaged)
                || toga_condition
                || alpha_floor_condition
                || (discretes.tcas_active && !self.previous_tcas_for_engagement));
        let hold = !athr_disabled
            && (!athr_push || discretes.land_active)
            && !discretes.athr_disconnect
            && !levers.pulled_to_idle(&previous_levers)
            && self.engaged;
        self.engaged = engage || hold;

        let status = if self.engaged
            && !on_ground
            && (tla_in_active_range || alpha_floor_condition)
        {
            AutothrustStatus::EngagedActive
        } else if self.engaged {
            AutothrustStatus::EngagedArmed
        } else {
            AutothrustStatus::Disengaged
        };
        if status != self.status {
            debug!("A/THR {} -> {}", self.status, status);
        }
        self.status = status;

        self.previous_levers = Some(*levers);
        self.previous_alpha_floor = discretes.alpha_floor_condition && !self.alpha_floor_inhibited;
        self.previous_tcas_for_engagement = discretes.tcas_active;

        EngagementState {
            status,
            on_ground,
            athr_disabled,
            athr_push,
            tla_in_active_range,
            flex_active,
            alpha_floor_inhibited: self.alpha_floor_inhibited,
            alpha_floor_active: self.previous_alpha_floor,
        }
    }

    /// A held pushbutton is recognized once. It is recognized again after it has been released
    /// for the re-arm time.
    fn update_push(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        parameters: &AutothrustParameters,
    ) -> bool {
        let push = input.discretes.athr_push;
        let released_time = self.push_released.update(!push, input.delta);
        let already_recognized = self.push_memory.update(
            self.previous_push,
            released_time >= parameters.push_rearm_time(),
        );
        self.previous_push = push;

        push && !already_recognized
    }

    fn update_flex(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        on_ground: bool,
    ) -> bool {
        let flex_temperature = input.flex_temperature.get::<degree_celsius>();
        let flex_condition = flex_temperature > input.total_air_temperature.get::<degree_celsius>()
            && flex_temperature != 0.
            && input.flight_phase < 3;

        let latched = self.flex_latch.update(
            flex_condition && on_ground && levers.all_at(MCT_DETENT),
            levers.all_at(CLB_DETENT) || levers.all_at(TOGA_DETENT),
        );

        (flex_condition && on_ground) || (!on_ground && latched)
    }

    fn update_alpha_floor_inhibit(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        parameters: &AutothrustParameters,
    ) {
        let tcas_active = input.discretes.tcas_active;
        let tcas_active_time = self.tcas_active_time.update(tcas_active, input.delta);

        let inhibited = (!self.previous_tcas_for_inhibit
            && tcas_active
            && levers.all(|angle| angle <= CLB_DETENT))
            || self.alpha_floor_inhibited;
        let inhibited = inhibited
            && (tcas_active_time <= parameters.tcas_inhibit_release_time()
                || levers.all(|angle| angle >= CLB_DETENT));

        self.alpha_floor_inhibited = tcas_active && inhibited;
        self.previous_tcas_for_inhibit = tcas_active;
    }

    /// Fires once, a short time after SRS takeoff or go around engaged.
    fn update_toga_condition(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        parameters: &AutothrustParameters,
    ) -> bool {
        let srs_to_ga = input.discretes.srs_to_active || input.discretes.srs_ga_active;
        self.toga_latched |= !self.previous_srs_to_ga && srs_to_ga;
        self.previous_srs_to_ga = srs_to_ga;

        let latched_time = self
            .toga_latched_time
            .update(self.toga_latched, input.delta);
        if self.toga_latched && latched_time >= parameters.toga_engagement_delay() {
            self.toga_latched = false;
            true
        } else {
            false
        }
    }
}

/// Inhibits the thrust reduction when SRS engages above the thrust reduction altitude.
pub(super) struct ThrustReductionInhibit {
    inhibited: bool,
    was_srs_to_active: bool,
    was_srs_ga_active: bool,
}

impl ThrustReductionInhibit {
    pub fn new() -> Self {
        Self {
            inhibited: false,
            was_srs_to_active: false,
            was_srs_ga_active: false,
        }
    }

    pub fn update<const ENGINES: usize>(&mut self, input: &AutothrustInput<ENGINES>) -> bool {
        let discretes = &input.discretes;
        let altitude = input.indicated_altitude.get::<foot>();

        self.inhibited = (discretes.srs_to_active
            && !self.was_srs_to_active
            && altitude > input.thrust_reduction_altitude.get::<foot>())
            || (discretes.srs_ga_active
                && !self.was_srs_ga_active
                && altitude > input.thrust_reduction_altitude_go_around.get::<foot>())
            || ((discretes.srs_to_active || discretes.srs_ga_active) && self.inhibited);

        self.was_srs_to_active = discretes.srs_to_active;
        self.was_srs_ga_active = discretes.srs_ga_active;

        self.inhibited
    }
}
