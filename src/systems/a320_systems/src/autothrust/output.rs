use strum::{Display, EnumIter, FromRepr};
use uom::si::{f64::*, ratio::percent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum AutothrustStatus {
    #[strum(serialize = "DISENGAGED")]
    Disengaged = 0,
    #[strum(serialize = "ENGAGED ARMED")]
    EngagedArmed = 1,
    #[strum(serialize = "ENGAGED ACTIVE")]
    EngagedActive = 2,
}

impl Default for AutothrustStatus {
    fn default() -> Self {
        AutothrustStatus::Disengaged
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum AutothrustMode {
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "MAN INIT")]
    ManInit = 1,
    #[strum(serialize = "MAN TOGA")]
    ManToga = 2,
    #[strum(serialize = "MAN GA SOFT")]
    ManGaSoft = 3,
    #[strum(serialize = "MAN FLEX")]
    ManFlex = 4,
    #[strum(serialize = "MAN DTO")]
    ManDto = 5,
    #[strum(serialize = "MAN MCT")]
    ManMct = 6,
    #[strum(serialize = "MAN THR")]
    ManThr = 7,
    #[strum(serialize = "SPEED")]
    Speed = 8,
    #[strum(serialize = "MACH")]
    Mach = 9,
    #[strum(serialize = "THR MCT")]
    ThrMct = 10,
    #[strum(serialize = "THR CLB")]
    ThrClb = 11,
    #[strum(serialize = "THR LVR")]
    ThrLvr = 12,
    #[strum(serialize = "THR IDLE")]
    ThrIdle = 13,
    #[strum(serialize = "A.FLOOR")]
    AlphaFloor = 14,
    #[strum(serialize = "TOGA LK")]
    TogaLk = 15,
}

impl Default for AutothrustMode {
    fn default() -> Self {
        AutothrustMode::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum AutothrustModeMessage {
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "THR LK")]
    ThrLk = 1,
    #[strum(serialize = "LVR TOGA")]
    LvrToga = 2,
    #[strum(serialize = "LVR CLB")]
    LvrClb = 3,
    #[strum(serialize = "LVR MCT")]
    LvrMct = 4,
    #[strum(serialize = "LVR ASYM")]
    LvrAsym = 5,
}

impl Default for AutothrustModeMessage {
    fn default() -> Self {
        AutothrustModeMessage::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum ThrustLimitType {
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "CLB")]
    Climb = 1,
    #[strum(serialize = "MCT")]
    Mct = 2,
    #[strum(serialize = "FLEX")]
    Flex = 3,
    #[strum(serialize = "TOGA")]
    Toga = 4,
    #[strum(serialize = "REVERSE")]
    Reverse = 5,
}

impl Default for ThrustLimitType {
    fn default() -> Self {
        ThrustLimitType::None
    }
}

/// The region of its travel a thrust lever is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum ThrustLeverRegion {
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "REVERSE")]
    Reverse = 1,
    #[strum(serialize = "IDLE")]
    Idle = 2,
    #[strum(serialize = "IDLE-CLB")]
    IdleToClimb = 3,
    #[strum(serialize = "CLB-MCT")]
    ClimbToMct = 4,
    #[strum(serialize = "MCT-TOGA")]
    MctToToga = 5,
    #[strum(serialize = "TOGA")]
    Toga = 6,
}

impl Default for ThrustLeverRegion {
    fn default() -> Self {
        ThrustLeverRegion::None
    }
}

impl From<f64> for ThrustLeverRegion {
    fn from(tla_deg: f64) -> Self {
        if tla_deg < 0. {
            ThrustLeverRegion::Reverse
        } else if tla_deg == 0. {
            ThrustLeverRegion::Idle
        } else if tla_deg < 25. {
            ThrustLeverRegion::IdleToClimb
        } else if tla_deg < 35. {
            ThrustLeverRegion::ClimbToMct
        } else if tla_deg < 45. {
            ThrustLeverRegion::MctToToga
        } else if tla_deg == 45. {
            ThrustLeverRegion::Toga
        } else {
            ThrustLeverRegion::None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutothrustOutput<const ENGINES: usize> {
    pub status: AutothrustStatus,
    pub mode: AutothrustMode,
    pub mode_message: AutothrustModeMessage,
    pub thrust_limit_type: ThrustLimitType,
    pub thrust_limit: Ratio,
    pub n1_command: [Ratio; ENGINES],
    pub n1_tla: [Ratio; ENGINES],
    pub in_reverse: [bool; ENGINES],
    pub thrust_lever_region: [ThrustLeverRegion; ENGINES],
    /// Position the simulator drives its thrust lever animation towards.
    pub sim_throttle_lever_position: [f64; ENGINES],
    pub flex_active: bool,
    pub tla_in_active_range: bool,
    pub athr_disabled: bool,
    pub alpha_floor_inhibited: bool,
    pub on_ground: bool,
    pub thrust_lever_warning_flex: bool,
    pub thrust_lever_warning_toga: bool,
}

impl<const ENGINES: usize> Default for AutothrustOutput<ENGINES> {
    fn default() -> Self {
        Self {
            status: AutothrustStatus::Disengaged,
            mode: AutothrustMode::None,
            mode_message: AutothrustModeMessage::None,
            thrust_limit_type: ThrustLimitType::None,
            thrust_limit: Ratio::new::<percent>(0.),
            n1_command: [Ratio::new::<percent>(0.); ENGINES],
            n1_tla: [Ratio::new::<percent>(0.); ENGINES],
            in_reverse: [false; ENGINES],
            thrust_lever_region: [ThrustLeverRegion::None; ENGINES],
            sim_throttle_lever_position: [0.; ENGINES],
            flex_active: false,
            tla_in_active_range: false,
            athr_disabled: false,
            alpha_floor_inhibited: false,
            on_ground: true,
            thrust_lever_warning_flex: false,
            thrust_lever_warning_toga: false,
        }
    }
}
