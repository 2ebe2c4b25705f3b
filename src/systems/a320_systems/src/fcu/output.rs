use super::input::{EfisMode, EfisNavaid, EfisPanelInput, EfisRange};
use strum::{Display, EnumIter, FromRepr};
use systems::shared::arinc429::{Arinc429DiscretesWordBuilder, Arinc429Word, SignStatus};

/// The navigation display overlay selected on an EFIS control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum EfisFilter {
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "CSTR")]
    Cstr = 1,
    #[strum(serialize = "WPT")]
    Wpt = 2,
    #[strum(serialize = "VOR.D")]
    Vord = 3,
    #[strum(serialize = "NDB")]
    Ndb = 4,
    #[strum(serialize = "ARPT")]
    Arpt = 5,
}

impl Default for EfisFilter {
    fn default() -> Self {
        EfisFilter::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum BaroReference {
    #[strum(serialize = "STD")]
    Std = 0,
    #[strum(serialize = "QNH")]
    Qnh = 1,
    #[strum(serialize = "QFE")]
    Qfe = 2,
}

impl Default for BaroReference {
    fn default() -> Self {
        BaroReference::Std
    }
}

/// What the baro window of an EFIS control panel shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum BaroDisplayMode {
    #[strum(serialize = "STD")]
    Std = 0,
    #[strum(serialize = "HPA")]
    Hpa = 1,
    #[strum(serialize = "INHG")]
    InHg = 2,
}

impl Default for BaroDisplayMode {
    fn default() -> Self {
        BaroDisplayMode::Std
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EfisLights {
    pub fd: bool,
    pub ls: bool,
    pub cstr: bool,
    pub wpt: bool,
    pub vord: bool,
    pub ndb: bool,
    pub arpt: bool,
}

impl EfisLights {
    pub(super) fn new(fd: bool, ls: bool, filter: EfisFilter) -> Self {
        Self {
            fd,
            ls,
            cstr: filter == EfisFilter::Cstr,
            wpt: filter == EfisFilter::Wpt,
            vord: filter == EfisFilter::Vord,
            ndb: filter == EfisFilter::Ndb,
            arpt: filter == EfisFilter::Arpt,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EfisOutputs {
    pub lights: EfisLights,
    pub filter: EfisFilter,
    pub baro_reference: BaroReference,
    pub baro_display_mode: BaroDisplayMode,
    /// Zero while STD is shown, hPa or inHg otherwise.
    pub baro_value: f64,
    pub baro_setting_hpa: f64,
    pub baro_setting_inhg: f64,
}

/// Push, pull and turn of an AFS knob, stretched so the guidance computers see them for at least
/// one of their cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KnobActions {
    pub pushed: bool,
    pub pulled: bool,
    pub turned: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AfsKnobOutputs {
    pub spd_mach: KnobActions,
    pub hdg_trk: KnobActions,
    pub alt: KnobActions,
    pub vs_fpa: KnobActions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AfsOutputs {
    pub loc_light_on: bool,
    pub exped_light_on: bool,
    pub appr_light_on: bool,
    pub ap_1_light_on: bool,
    pub ap_2_light_on: bool,
    pub athr_light_on: bool,
    pub trk_fpa_mode: bool,
    pub mach_mode: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FcuDiscreteOutputs {
    pub capt_efis: EfisOutputs,
    pub fo_efis: EfisOutputs,
    pub afs: AfsOutputs,
    pub fcu_healthy: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FcuBusOutputs {
    pub baro_setting_left_hpa: Arinc429Word<f64>,
    pub baro_setting_left_inhg: Arinc429Word<f64>,
    pub baro_setting_right_hpa: Arinc429Word<f64>,
    pub baro_setting_right_inhg: Arinc429Word<f64>,
    pub eis_discrete_word_1_left: Arinc429Word<f64>,
    pub eis_discrete_word_1_right: Arinc429Word<f64>,
    pub eis_discrete_word_2_left: Arinc429Word<f64>,
    pub eis_discrete_word_2_right: Arinc429Word<f64>,
    pub fcu_discrete_word_1: Arinc429Word<f64>,
    pub fcu_discrete_word_2: Arinc429Word<f64>,
    pub ats_discrete_word: Arinc429Word<f64>,
    pub ats_fma_discrete_word: Arinc429Word<f64>,
    pub flex_to_temp_deg_c: Arinc429Word<f64>,
    pub n1_command_percent: Arinc429Word<f64>,
}

/// Guidance values of the FMGC which has priority, zero when its words are invalid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChosenFmgcData {
    pub cas_kts: f64,
    pub mach: f64,
    pub heading_deg: f64,
    pub track_deg: f64,
    pub altitude_ft: f64,
    pub vertical_speed_ft_min: f64,
    pub fpa_deg: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FcuLogicOutputs {
    pub fmgc_1_has_priority: bool,
    pub chosen_fmgc_data: ChosenFmgcData,
    pub any_ap_fd_engaged: bool,
    pub afs_knobs: AfsKnobOutputs,
    pub trk_fpa_active: bool,
    pub metric_alt_active: bool,
    pub mach_active: bool,
    pub auto_speed_control: bool,
}

/// Everything the FCU produces in one frame. The default value is what an unhealthy FCU
/// transmits: all discretes off and every bus word flagged as failed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FcuOutput {
    pub discrete_outputs: FcuDiscreteOutputs,
    pub bus_outputs: FcuBusOutputs,
    pub logic: FcuLogicOutputs,
}

pub(super) fn eis_discrete_word_1(panel: &EfisPanelInput) -> Arinc429Word<f64> {
    let mut word = Arinc429DiscretesWordBuilder::new();
    word.set(11, panel.baro_is_inhg)
        .set(25, panel.range == EfisRange::Range10)
        .set(26, panel.range == EfisRange::Range20)
        .set(27, panel.range == EfisRange::Range40)
        .set(28, panel.range == EfisRange::Range80)
        .set(29, panel.range == EfisRange::Range160);

    word.build(SignStatus::NormalOperation)
}

pub(super) fn eis_discrete_word_2(
    panel: &EfisPanelInput,
    efis: &EfisOutputs,
) -> Arinc429Word<f64> {
    let mut word = Arinc429DiscretesWordBuilder::new();
    word.set(11, panel.mode == EfisMode::Plan)
        .set(12, panel.mode == EfisMode::Arc)
        .set(13, panel.mode == EfisMode::RoseNav)
        .set(14, panel.mode == EfisMode::RoseVor)
        .set(15, panel.mode == EfisMode::RoseIls)
        .set(17, efis.filter == EfisFilter::Cstr)
        .set(18, efis.filter == EfisFilter::Wpt)
        .set(19, efis.filter == EfisFilter::Vord)
        .set(20, efis.filter == EfisFilter::Ndb)
        .set(21, efis.filter == EfisFilter::Arpt)
        .set(22, efis.lights.ls)
        .set(23, !efis.lights.fd)
        .set(24, panel.navaid_1 == EfisNavaid::Adf)
        .set(25, panel.navaid_2 == EfisNavaid::Adf)
        .set(26, panel.navaid_1 == EfisNavaid::Vor)
        .set(27, panel.navaid_2 == EfisNavaid::Vor)
        .set(28, efis.baro_reference == BaroReference::Std)
        .set(29, efis.baro_reference == BaroReference::Qnh);

    word.build(SignStatus::NormalOperation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EfisRange::Range10, Some(25))]
    #[case(EfisRange::Range20, Some(26))]
    #[case(EfisRange::Range40, Some(27))]
    #[case(EfisRange::Range80, Some(28))]
    #[case(EfisRange::Range160, Some(29))]
    #[case(EfisRange::Range320, None)]
    fn eis_word_1_encodes_range(#[case] range: EfisRange, #[case] expected_bit: Option<u8>) {
        let panel = EfisPanelInput {
            range,
            ..Default::default()
        };

        let word = eis_discrete_word_1(&panel);

        for bit in 25..=29 {
            assert_eq!(word.bit(bit), Some(bit) == expected_bit);
        }
    }

    #[rstest]
    #[case(EfisMode::Plan, 11)]
    #[case(EfisMode::Arc, 12)]
    #[case(EfisMode::RoseNav, 13)]
    #[case(EfisMode::RoseVor, 14)]
    #[case(EfisMode::RoseIls, 15)]
    fn eis_word_2_encodes_mode(#[case] mode: EfisMode, #[case] expected_bit: u8) {
        let panel = EfisPanelInput {
            mode,
            ..Default::default()
        };

        let word = eis_discrete_word_2(&panel, &EfisOutputs::default());

        for bit in 11..=15 {
            assert_eq!(word.bit(bit), bit == expected_bit);
        }
    }

    #[test]
    fn eis_word_2_flags_fd_off_and_std() {
        let word = eis_discrete_word_2(&EfisPanelInput::default(), &EfisOutputs::default());

        assert!(word.is_normal());
        assert!(word.bit(23));
        assert!(word.bit(28));
        assert!(!word.bit(29));
    }

    #[test]
    fn default_output_is_failed() {
        let output = FcuOutput::default();

        assert!(!output.discrete_outputs.fcu_healthy);
        assert_eq!(
            output.bus_outputs.fcu_discrete_word_1.ssm(),
            SignStatus::FailureWarning
        );
        assert_eq!(output.bus_outputs.baro_setting_left_hpa.value(), 0.);
    }
}
