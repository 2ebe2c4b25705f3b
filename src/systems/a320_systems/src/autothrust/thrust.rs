use super::{
    input::{AutothrustInput, ModeRequest, ThrustLimits},
    levers::{ThrustLevers, CLB_DETENT, IDLE_DETENT, MCT_DETENT, TOGA_DETENT},
    output::{AutothrustMode, AutothrustStatus, ThrustLimitType},
    parameters::AutothrustParameters,
};
use std::time::Duration;
use systems::shared::{
    filters::LagFilter,
    rate_limiter::{LimitedIntegrator, RateLimiter},
};
use uom::si::{f64::*, ratio::percent, velocity::knot};

const REVERSE_IDLE_TLA: f64 = 6.;
const REVERSE_MAX_TLA: f64 = 20.;

fn is_alpha_floor_or_toga_lock(mode: AutothrustMode) -> bool {
    mode == AutothrustMode::AlphaFloor || mode == AutothrustMode::TogaLk
}

/// The thrust limit shown for the current lever position. In the air the highest lever selects
/// among CLB, MCT or FLEX and TOGA. On ground the limit is TOGA or FLEX.
pub(super) fn thrust_limit<const ENGINES: usize>(
    levers: &ThrustLevers<ENGINES>,
    on_ground: bool,
    flex_active: bool,
    mode: AutothrustMode,
    limits: &ThrustLimits,
) -> (ThrustLimitType, Ratio) {
    let highest = if on_ground {
        levers.highest()
    } else {
        levers.highest().max(IDLE_DETENT)
    };

    let limit_type = if !on_ground || !levers.any_engine_operative() {
        if is_alpha_floor_or_toga_lock(mode) || highest > MCT_DETENT {
            ThrustLimitType::Toga
        } else if highest > CLB_DETENT {
            if flex_active {
                ThrustLimitType::Flex
            } else {
                ThrustLimitType::Mct
            }
        } else if highest >= IDLE_DETENT {
            ThrustLimitType::Climb
        } else {
            ThrustLimitType::Reverse
        }
    } else if highest >= IDLE_DETENT {
        if !flex_active || highest > MCT_DETENT {
            ThrustLimitType::Toga
        } else {
            ThrustLimitType::Flex
        }
    } else {
        ThrustLimitType::Reverse
    };

    let limit = match limit_type {
        ThrustLimitType::None => Ratio::new::<percent>(0.),
        ThrustLimitType::Climb => limits.climb,
        ThrustLimitType::Mct => limits.mct,
        ThrustLimitType::Flex => limits.flex,
        ThrustLimitType::Toga => limits.toga,
        ThrustLimitType::Reverse => limits.reverse,
    };

    (limit_type, limit)
}

/// Converts a thrust lever angle into N1 in percent by interpolating between the N1 limits of
/// the detents. Returns the N1 and whether the lever is in the reverse range.
pub(super) fn n1_from_tla(
    tla: f64,
    on_ground: bool,
    flex_active: bool,
    limits: &ThrustLimits,
) -> (f64, bool) {
    let tla = if on_ground { tla } else { tla.max(IDLE_DETENT) };
    let in_reverse = tla < IDLE_DETENT;

    let idle = limits.idle.get::<percent>();
    let climb = limits.climb.get::<percent>();
    let mct_or_flex = if flex_active {
        limits.flex.get::<percent>()
    } else {
        limits.mct.get::<percent>()
    };

    let (tla, (tla_begin, n1_begin), (tla_end, n1_end)) = if in_reverse {
        (
            tla.abs().max(REVERSE_IDLE_TLA),
            (REVERSE_IDLE_TLA, (idle + 1.).abs()),
            (REVERSE_MAX_TLA, limits.reverse.get::<percent>().abs()),
        )
    } else if tla <= CLB_DETENT {
        (tla, (IDLE_DETENT, idle), (CLB_DETENT, climb))
    } else if tla <= MCT_DETENT {
        (tla, (CLB_DETENT, climb), (MCT_DETENT, mct_or_flex))
    } else {
        (
            tla,
            (MCT_DETENT, mct_or_flex),
            (TOGA_DETENT, limits.toga.get::<percent>()),
        )
    };

    let n1 = (n1_end - n1_begin) / (tla_end - tla_begin) * (tla - tla_begin) + n1_begin;
    (n1, in_reverse)
}

/// Keeps the thrust frozen at its current value when the autothrust stops controlling thrust
/// while the levers are in the autothrust detent.
pub(super) struct ThrustMemo {
    active: bool,
    previous_auto_thrust_control: bool,
}

impl ThrustMemo {
    pub fn new() -> Self {
        Self {
            active: false,
            previous_auto_thrust_control: false,
        }
    }

    pub fn update<const ENGINES: usize>(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        status: AutothrustStatus,
        auto_thrust_control: bool,
    ) -> bool {
        let discretes = &input.discretes;
        let control_lost = !auto_thrust_control
            && self.previous_auto_thrust_control
            && !discretes.athr_disconnect;

        self.active = (((discretes.athr_push && status != AutothrustStatus::Disengaged)
            || control_lost)
            && levers.in_autothrust_detent())
            || (!auto_thrust_control && levers.any_in_climb_or_mct_detent() && self.active);
        self.previous_auto_thrust_control = auto_thrust_control;

        self.active
    }
}

/// Computes the N1 the autothrust commands while it actively controls thrust. The command is
/// integrated from a rate which depends on the requested mode and then rate limited.
pub(super) struct N1Command {
    integrator: LimitedIntegrator,
    limiter: RateLimiter,
    acceleration: LagFilter,
    previous_airspeed: Option<f64>,
    seeded: bool,
}

impl N1Command {
    pub fn new(parameters: &AutothrustParameters) -> Self {
        Self {
            integrator: LimitedIntegrator::new(0.),
            limiter: RateLimiter::new(
                parameters.n1_rate_up_percent_per_s,
                parameters.n1_rate_down_percent_per_s,
                0.,
            ),
            acceleration: LagFilter::new(parameters.acceleration_filter_cutoff),
            previous_airspeed: None,
            seeded: false,
        }
    }

    /// Returns the rate limited N1 in percent. While the autothrust is not in control the command
    /// follows the highest commanded N1 so that taking over does not cause a thrust step.
    pub fn update<const ENGINES: usize>(
        &mut self,
        input: &AutothrustInput<ENGINES>,
        levers: &ThrustLevers<ENGINES>,
        status: AutothrustStatus,
        mode: AutothrustMode,
        parameters: &AutothrustParameters,
    ) -> f64 {
        let acceleration = self.filtered_acceleration(input);
        let reseed = !self.seeded
            || status != AutothrustStatus::EngagedActive
            || is_alpha_floor_or_toga_lock(mode);
        self.seeded = true;

        let limits = &input.thrust_limits;
        let idle = limits.idle.get::<percent>();
        let upper = if levers.all_engines_operative() {
            limits.climb.get::<percent>()
        } else {
            limits.mct.get::<percent>()
        };

        let rate = if reseed {
            let highest_commanded = input
                .commanded_n1
                .iter()
                .map(|n1| n1.get::<percent>())
                .fold(f64::NEG_INFINITY, f64::max);
            self.integrator.reset_to(highest_commanded);
            0.
        } else {
            Self::rate(input, acceleration, parameters)
        };
        let integrated = self.integrator.update(rate, input.delta, idle, upper);

        if reseed {
            self.limiter.reset_to(integrated);
        }
        let down_rate = if input.mode_requested == ModeRequest::Retard {
            parameters.n1_rate_retard_percent_per_s
        } else {
            parameters.n1_rate_down_percent_per_s
        };
        self.limiter
            .set_rates(parameters.n1_rate_up_percent_per_s, down_rate);

        self.limiter.update(integrated, input.delta)
    }

    fn rate<const ENGINES: usize>(
        input: &AutothrustInput<ENGINES>,
        acceleration: f64,
        parameters: &AutothrustParameters,
    ) -> f64 {
        match input.mode_requested {
            ModeRequest::None => 0.,
            ModeRequest::SpeedMach => {
                let error = Self::speed_error(input);
                parameters.speed_error_gain.lookup(error) * error
                    - parameters.acceleration_gain * acceleration
            }
            ModeRequest::ThrustIdle => parameters.thrust_idle_rate_percent_per_s,
            ModeRequest::ThrustClimbMct => parameters.thrust_climb_mct_rate_percent_per_s,
            ModeRequest::Retard => parameters.retard_rate_percent_per_s,
        }
    }

    /// The error in knots to the target speed, bounded by the lowest selectable and the maximum
    /// speed.
    fn speed_error<const ENGINES: usize>(input: &AutothrustInput<ENGINES>) -> f64 {
        let mut speeds = [
            input.lowest_selectable_speed.get::<knot>(),
            input.target_speed.get::<knot>(),
            input.maximum_speed.get::<knot>(),
        ];
        speeds.sort_by(|a, b| a.total_cmp(b));

        speeds[1] - input.indicated_airspeed.get::<knot>()
    }

    /// Knots per second.
    fn filtered_acceleration<const ENGINES: usize>(
        &mut self,
        input: &AutothrustInput<ENGINES>,
    ) -> f64 {
        let airspeed = input.indicated_airspeed.get::<knot>();
        let dt = input.delta.as_secs_f64();
        let acceleration = match self.previous_airspeed {
            Some(previous) if dt > 0. => (airspeed - previous) / dt,
            _ => 0.,
        };
        self.previous_airspeed = Some(airspeed);

        self.acceleration.update(acceleration, input.delta)
    }
}

/// Where the N1 command of the engines comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum N1CommandSource {
    Autothrust,
    /// The commanded N1 is held.
    ThrustMemo,
    Lever,
}

impl N1CommandSource {
    pub fn new(auto_thrust_control: bool, thrust_memo: bool) -> Self {
        if auto_thrust_control {
            N1CommandSource::Autothrust
        } else if thrust_memo {
            N1CommandSource::ThrustMemo
        } else {
            N1CommandSource::Lever
        }
    }

    /// The N1 command of a single engine in percent. The autothrust command never exceeds the
    /// N1 selected by the lever, except in A.FLOOR and TOGA LK where at least TOGA is commanded.
    pub fn engine_command(
        self,
        n1_tla: f64,
        commanded_n1: f64,
        autothrust_n1: f64,
        mode: AutothrustMode,
        limits: &ThrustLimits,
    ) -> f64 {
        match self {
            N1CommandSource::Autothrust if is_alpha_floor_or_toga_lock(mode) => {
                limits.toga.get::<percent>().max(n1_tla)
            }
            N1CommandSource::Autothrust if autothrust_n1 > n1_tla => n1_tla,
            N1CommandSource::Autothrust => autothrust_n1.max(limits.idle.get::<percent>()),
            N1CommandSource::ThrustMemo => commanded_n1,
            N1CommandSource::Lever => n1_tla,
        }
    }
}

/// Drives the simulator's thrust lever animation towards the N1 command. Forward and reverse use
/// separate integrators, the one for the direction not in use is held at zero.
pub(super) struct ThrottleLeverPosition {
    forward: LimitedIntegrator,
    reverse: LimitedIntegrator,
}

impl ThrottleLeverPosition {
    pub fn new() -> Self {
        Self {
            forward: LimitedIntegrator::new(0.),
            reverse: LimitedIntegrator::new(0.),
        }
    }

    pub fn update(
        &mut self,
        n1_command: f64,
        commanded_n1: f64,
        in_reverse: bool,
        delta: Duration,
        parameters: &AutothrustParameters,
    ) -> f64 {
        let error = n1_command - commanded_n1;
        let gain = if error > 0. {
            parameters.lever_gain_up
        } else {
            parameters.lever_gain_down
        };
        let limit = parameters.lever_position_limit;

        let (active, inactive) = if in_reverse {
            (&mut self.reverse, &mut self.forward)
        } else {
            (&mut self.forward, &mut self.reverse)
        };
        inactive.reset();

        active.update(gain * error, delta, -limit, limit)
    }
}
