use std::time::Duration;
use strum::{Display, EnumIter, FromRepr};
use uom::si::{
    angle::degree,
    f64::*,
    length::foot,
    ratio::{percent, ratio},
    thermodynamic_temperature::degree_celsius,
    velocity::{foot_per_minute, knot},
};

/// The thrust mode requested by the autoflight guidance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum ModeRequest {
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "SPEED/MACH")]
    SpeedMach = 1,
    #[strum(serialize = "THR IDLE")]
    ThrustIdle = 2,
    #[strum(serialize = "THR CLB/MCT")]
    ThrustClimbMct = 3,
    #[strum(serialize = "RETARD")]
    Retard = 4,
}

impl Default for ModeRequest {
    fn default() -> Self {
        ModeRequest::None
    }
}

/// N1 limits computed by the thrust limit computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrustLimits {
    pub idle: Ratio,
    pub climb: Ratio,
    pub mct: Ratio,
    pub flex: Ratio,
    pub toga: Ratio,
    /// Negative, the limit when the levers are in the reverse range.
    pub reverse: Ratio,
}

impl Default for ThrustLimits {
    fn default() -> Self {
        Self {
            idle: Ratio::new::<percent>(20.),
            climb: Ratio::new::<percent>(89.),
            mct: Ratio::new::<percent>(92.),
            flex: Ratio::new::<percent>(87.),
            toga: Ratio::new::<percent>(95.),
            reverse: Ratio::new::<percent>(-75.),
        }
    }
}

/// Discrete inputs of the autothrust. The pushbuttons are the instinctive disconnect on the thrust
/// levers and the A/THR pushbutton on the FCU.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AutothrustDiscretes {
    pub athr_push: bool,
    pub athr_disconnect: bool,
    pub athr_reset_disable: bool,
    pub srs_to_active: bool,
    pub srs_ga_active: bool,
    pub land_active: bool,
    pub mach_mode_active: bool,
    pub tcas_active: bool,
    pub alpha_floor_condition: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutothrustInput<const ENGINES: usize> {
    pub delta: Duration,
    pub simulation_time: Duration,
    pub thrust_lever_angle: [Angle; ENGINES],
    pub engine_operative: [bool; ENGINES],
    pub commanded_n1: [Ratio; ENGINES],
    /// Compression of the left and right main gear struts, zero when fully extended.
    pub gear_strut_compression: [Ratio; 2],
    pub total_air_temperature: ThermodynamicTemperature,
    pub indicated_altitude: Length,
    pub radio_altitude: Length,
    pub indicated_airspeed: Velocity,
    pub thrust_limits: ThrustLimits,
    pub flex_temperature: ThermodynamicTemperature,
    pub flight_phase: u8,
    pub mode_requested: ModeRequest,
    pub discretes: AutothrustDiscretes,
    pub target_speed: Velocity,
    pub lowest_selectable_speed: Velocity,
    pub maximum_speed: Velocity,
    pub tcas_ra_target_rate: Velocity,
    pub thrust_reduction_altitude: Length,
    pub thrust_reduction_altitude_go_around: Length,
}

impl<const ENGINES: usize> Default for AutothrustInput<ENGINES> {
    fn default() -> Self {
        Self {
            delta: Duration::ZERO,
            simulation_time: Duration::ZERO,
            thrust_lever_angle: [Angle::new::<degree>(0.); ENGINES],
            engine_operative: [true; ENGINES],
            commanded_n1: [Ratio::new::<percent>(20.); ENGINES],
            gear_strut_compression: [Ratio::new::<ratio>(0.5); 2],
            total_air_temperature: ThermodynamicTemperature::new::<degree_celsius>(15.),
            indicated_altitude: Length::new::<foot>(0.),
            radio_altitude: Length::new::<foot>(0.),
            indicated_airspeed: Velocity::new::<knot>(0.),
            thrust_limits: ThrustLimits::default(),
            flex_temperature: ThermodynamicTemperature::new::<degree_celsius>(0.),
            flight_phase: 0,
            mode_requested: ModeRequest::None,
            discretes: AutothrustDiscretes::default(),
            target_speed: Velocity::new::<knot>(0.),
            lowest_selectable_speed: Velocity::new::<knot>(0.),
            maximum_speed: Velocity::new::<knot>(0.),
            tcas_ra_target_rate: Velocity::new::<foot_per_minute>(0.),
            thrust_reduction_altitude: Length::new::<foot>(0.),
            thrust_reduction_altitude_go_around: Length::new::<foot>(0.),
        }
    }
}
