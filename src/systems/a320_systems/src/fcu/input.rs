use std::time::Duration;
use strum::{Display, EnumIter, FromRepr};
use systems::shared::arinc429::Arinc429Word;

/// A rotary knob which can also be pushed and pulled. `turns` counts the detents passed since the
/// previous frame, negative when turned counter clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KnobInput {
    pub pushed: bool,
    pub pulled: bool,
    pub turns: i8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum EfisRange {
    #[strum(serialize = "10")]
    Range10 = 0,
    #[strum(serialize = "20")]
    Range20 = 1,
    #[strum(serialize = "40")]
    Range40 = 2,
    #[strum(serialize = "80")]
    Range80 = 3,
    #[strum(serialize = "160")]
    Range160 = 4,
    #[strum(serialize = "320")]
    Range320 = 5,
}

impl Default for EfisRange {
    fn default() -> Self {
        EfisRange::Range10
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum EfisMode {
    #[strum(serialize = "ROSE ILS")]
    RoseIls = 0,
    #[strum(serialize = "ROSE VOR")]
    RoseVor = 1,
    #[strum(serialize = "ROSE NAV")]
    RoseNav = 2,
    #[strum(serialize = "ARC")]
    Arc = 3,
    #[strum(serialize = "PLAN")]
    Plan = 4,
}

impl Default for EfisMode {
    fn default() -> Self {
        EfisMode::RoseIls
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum EfisNavaid {
    #[strum(serialize = "OFF")]
    None = 0,
    #[strum(serialize = "ADF")]
    Adf = 1,
    #[strum(serialize = "VOR")]
    Vor = 2,
}

impl Default for EfisNavaid {
    fn default() -> Self {
        EfisNavaid::None
    }
}

/// The controls of one EFIS control panel. Buttons are true while held down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EfisPanelInput {
    pub range: EfisRange,
    pub mode: EfisMode,
    pub navaid_1: EfisNavaid,
    pub navaid_2: EfisNavaid,
    pub baro_is_inhg: bool,
    pub baro_knob: KnobInput,
    pub fd_button_pushed: bool,
    pub ls_button_pushed: bool,
    pub cstr_button_pushed: bool,
    pub wpt_button_pushed: bool,
    pub vord_button_pushed: bool,
    pub ndb_button_pushed: bool,
    pub arpt_button_pushed: bool,
}

/// The controls of the auto flight system panel. Buttons are true while held down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AfsPanelInput {
    pub spd_knob: KnobInput,
    pub hdg_trk_knob: KnobInput,
    pub alt_knob: KnobInput,
    pub vs_fpa_knob: KnobInput,
    pub loc_button_pressed: bool,
    pub exped_button_pressed: bool,
    pub appr_button_pressed: bool,
    pub spd_mach_button_pressed: bool,
    pub trk_fpa_button_pressed: bool,
    pub metric_alt_button_pressed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FcuDiscreteInputs {
    pub ap_1_engaged: bool,
    pub fd_1_engaged: bool,
    pub athr_1_engaged: bool,
    pub ap_2_engaged: bool,
    pub fd_2_engaged: bool,
    pub athr_2_engaged: bool,
    /// Pin programming enabling the QFE baro reference.
    pub pin_prog_qfe_avail: bool,
    pub capt_efis: EfisPanelInput,
    pub fo_efis: EfisPanelInput,
    pub afs: AfsPanelInput,
}

/// The words the FCU receives from one flight management and guidance computer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FmgcBus {
    pub cas_kts: Arinc429Word<f64>,
    pub mach: Arinc429Word<f64>,
    pub heading_deg: Arinc429Word<f64>,
    pub track_deg: Arinc429Word<f64>,
    pub altitude_ft: Arinc429Word<f64>,
    pub vertical_speed_ft_min: Arinc429Word<f64>,
    pub fpa_deg: Arinc429Word<f64>,
    pub discrete_word_1: Arinc429Word<f64>,
    pub discrete_word_2: Arinc429Word<f64>,
    pub discrete_word_3: Arinc429Word<f64>,
    pub discrete_word_4: Arinc429Word<f64>,
    pub discrete_word_5: Arinc429Word<f64>,
    pub discrete_word_7: Arinc429Word<f64>,
    pub ats_discrete_word: Arinc429Word<f64>,
    pub ats_fma_discrete_word: Arinc429Word<f64>,
    pub flx_to_temp_deg_c: Arinc429Word<f64>,
    pub n1_command_percent: Arinc429Word<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FcuChannelInput {
    pub powered: bool,
    /// A fault detected outside of the power supervision, e.g. an injected failure.
    pub fault_active: bool,
}

impl Default for FcuChannelInput {
    fn default() -> Self {
        Self {
            powered: true,
            fault_active: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FcuInput {
    pub delta: Duration,
    pub simulation_time: Duration,
    pub computer_running: bool,
    pub channels: [FcuChannelInput; 2],
    pub discretes: FcuDiscreteInputs,
    pub fmgc_1: FmgcBus,
    pub fmgc_2: FmgcBus,
    /// Baro setting in hPa pushed by the simulator for each side, if any.
    pub capt_baro_sync_hpa: Option<f64>,
    pub fo_baro_sync_hpa: Option<f64>,
}

impl Default for FcuInput {
    fn default() -> Self {
        Self {
            delta: Duration::ZERO,
            simulation_time: Duration::ZERO,
            computer_running: true,
            channels: [FcuChannelInput::default(); 2],
            discretes: FcuDiscreteInputs::default(),
            fmgc_1: FmgcBus::default(),
            fmgc_2: FmgcBus::default(),
            capt_baro_sync_hpa: None,
            fo_baro_sync_hpa: None,
        }
    }
}
