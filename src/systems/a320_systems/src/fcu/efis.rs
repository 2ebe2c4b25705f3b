use super::input::{EfisPanelInput, FmgcBus};
use super::output::{BaroDisplayMode, BaroReference, EfisFilter, EfisLights, EfisOutputs};
use super::parameters::FcuParameters;
use log::debug;
use systems::shared::clamp;
use systems::shared::logic::{PulseNode, ToggleFlipFlopNode};

const HPA_TO_INHG: f64 = 0.02953;
const INHG_TO_HPA: f64 = 33.8638687;
const STANDARD_HPA: f64 = 1013.;
const STANDARD_INHG: f64 = 29.92;

pub(super) trait FlightDirectorAutoSwitching {
    fn fd_auto_activate(&self) -> bool;
    fn fd_auto_deactivate(&self) -> bool;
}

/// Switches both flight directors on when a go around or takeoff mode engages, and off when the
/// guidance computer requests it.
pub(super) struct FlightDirectorAutoSwitchingActivation {
    activate: PulseNode,
    deactivate: PulseNode,
    fd_auto_activate: bool,
    fd_auto_deactivate: bool,
}

impl Default for FlightDirectorAutoSwitchingActivation {
    fn default() -> Self {
        Self {
            activate: PulseNode::new_leading(),
            deactivate: PulseNode::new_leading(),
            fd_auto_activate: false,
            fd_auto_deactivate: false,
        }
    }
}

impl FlightDirectorAutoSwitchingActivation {
    pub fn update(&mut self, fmgc_1: &FmgcBus) {
        self.fd_auto_activate = self
            .activate
            .update(fmgc_1.discrete_word_1.bit(16) || fmgc_1.discrete_word_7.bit(13));
        self.fd_auto_deactivate = self.deactivate.update(fmgc_1.discrete_word_4.bit(27));
    }
}

impl FlightDirectorAutoSwitching for FlightDirectorAutoSwitchingActivation {
    fn fd_auto_activate(&self) -> bool {
        self.fd_auto_activate
    }

    fn fd_auto_deactivate(&self) -> bool {
        self.fd_auto_deactivate
    }
}

/// Buttons of the filter selection, in the order in which simultaneous presses are resolved.
#[derive(Clone, Copy, Default)]
pub(super) struct FilterButtons {
    pub cstr: bool,
    pub wpt: bool,
    pub vord: bool,
    pub ndb: bool,
    pub arpt: bool,
}

impl FilterButtons {
    fn pressed(&self, filter: EfisFilter) -> bool {
        match filter {
            EfisFilter::None => false,
            EfisFilter::Cstr => self.cstr,
            EfisFilter::Wpt => self.wpt,
            EfisFilter::Vord => self.vord,
            EfisFilter::Ndb => self.ndb,
            EfisFilter::Arpt => self.arpt,
        }
    }
}

impl EfisFilter {
    const SELECTABLE: [EfisFilter; 5] = [
        EfisFilter::Cstr,
        EfisFilter::Wpt,
        EfisFilter::Vord,
        EfisFilter::Ndb,
        EfisFilter::Arpt,
    ];

    /// Pressing the button of the active filter deselects it, pressing another one selects that
    /// one instead.
    pub(super) fn transition(self, pressed: &FilterButtons) -> EfisFilter {
        if pressed.pressed(self) {
            EfisFilter::None
        } else {
            Self::SELECTABLE
                .iter()
                .copied()
                .find(|&filter| pressed.pressed(filter))
                .unwrap_or(self)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct BaroReferenceSelection {
    std: bool,
    qnh: bool,
    qfe: bool,
}

impl Default for BaroReferenceSelection {
    fn default() -> Self {
        Self {
            std: false,
            qnh: true,
            qfe: false,
        }
    }
}

impl BaroReferenceSelection {
    /// Pulling the knob selects STD, pushing it leaves STD or, outside of STD, swaps between QNH
    /// and QFE. QFE is only offered when the aircraft is pin programmed for it.
    pub(super) fn transition(self, push: bool, pull: bool, qfe_available: bool) -> Self {
        let mut next = self;
        if push && self.std {
            next.std = false;
        } else if push {
            next.qnh = !self.qnh;
            next.qfe = !self.qfe;
        } else if pull && !self.std {
            next.std = true;
        }

        if !qfe_available {
            next.qnh = true;
            next.qfe = false;
        }
        next
    }

    pub(super) fn reference(&self) -> BaroReference {
        if self.std {
            BaroReference::Std
        } else if self.qfe {
            BaroReference::Qfe
        } else {
            BaroReference::Qnh
        }
    }
}

/// The selected baro setting, kept in both units so switching units shows the matching value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct BaroSetting {
    hpa: f64,
    inhg: f64,
}

impl Default for BaroSetting {
    fn default() -> Self {
        Self {
            hpa: STANDARD_HPA,
            inhg: STANDARD_INHG,
        }
    }
}

impl BaroSetting {
    pub(super) fn transition(
        self,
        clicks: i8,
        std: bool,
        in_inhg: bool,
        sync_hpa: Option<f64>,
        parameters: &FcuParameters,
    ) -> Self {
        let mut next = match sync_hpa {
            Some(hpa) => Self {
                hpa,
                inhg: hpa * HPA_TO_INHG,
            },
            None => self,
        };

        if !std && !in_inhg {
            next.hpa = clamp(
                next.hpa + clicks as f64,
                parameters.baro_hpa_min,
                parameters.baro_hpa_max,
            );
            next.inhg = (next.hpa * HPA_TO_INHG * 100.).round() / 100.;
        } else if !std {
            next.inhg = clamp(
                next.inhg + clicks as f64 * 0.01,
                parameters.baro_inhg_min,
                parameters.baro_inhg_max,
            );
            next.hpa = (next.inhg * INHG_TO_HPA).round();
        }
        next
    }

    pub(super) fn hpa(&self) -> f64 {
        self.hpa
    }

    pub(super) fn inhg(&self) -> f64 {
        self.inhg
    }
}

/// The state of one EFIS control panel. Captain and first officer panels are independent.
pub(super) struct EfisPanelLogic {
    side: &'static str,
    fd_button: PulseNode,
    ls_button: PulseNode,
    cstr_button: PulseNode,
    wpt_button: PulseNode,
    vord_button: PulseNode,
    ndb_button: PulseNode,
    arpt_button: PulseNode,
    baro_push: PulseNode,
    baro_pull: PulseNode,
    fd_on: bool,
    ls: ToggleFlipFlopNode,
    filter: EfisFilter,
    baro_reference: BaroReferenceSelection,
    baro_setting: BaroSetting,
}

impl EfisPanelLogic {
    pub fn new(side: &'static str) -> Self {
        Self {
            side,
            fd_button: PulseNode::new_leading(),
            ls_button: PulseNode::new_leading(),
            cstr_button: PulseNode::new_leading(),
            wpt_button: PulseNode::new_leading(),
            vord_button: PulseNode::new_leading(),
            ndb_button: PulseNode::new_leading(),
            arpt_button: PulseNode::new_leading(),
            baro_push: PulseNode::new_leading(),
            baro_pull: PulseNode::new_leading(),
            fd_on: true,
            ls: ToggleFlipFlopNode::new(false),
            filter: EfisFilter::None,
            baro_reference: BaroReferenceSelection::default(),
            baro_setting: BaroSetting::default(),
        }
    }

    pub fn update(
        &mut self,
        panel: &EfisPanelInput,
        qfe_available: bool,
        sync_hpa: Option<f64>,
        flight_director: &impl FlightDirectorAutoSwitching,
        parameters: &FcuParameters,
    ) {
        let fd_pressed = self.fd_button.update(panel.fd_button_pushed);
        self.fd_on = if flight_director.fd_auto_activate() {
            true
        } else if flight_director.fd_auto_deactivate() {
            false
        } else {
            self.fd_on != fd_pressed
        };

        let ls_pressed = self.ls_button.update(panel.ls_button_pushed);
        self.ls.update(ls_pressed);

        let filter_buttons = FilterButtons {
            cstr: self.cstr_button.update(panel.cstr_button_pushed),
            wpt: self.wpt_button.update(panel.wpt_button_pushed),
            vord: self.vord_button.update(panel.vord_button_pushed),
            ndb: self.ndb_button.update(panel.ndb_button_pushed),
            arpt: self.arpt_button.update(panel.arpt_button_pushed),
        };
        let filter = self.filter.transition(&filter_buttons);
        if filter != self.filter {
            debug!("{} EFIS filter {} selected", self.side, filter);
        }
        self.filter = filter;

        let push = self.baro_push.update(panel.baro_knob.pushed);
        let pull = self.baro_pull.update(panel.baro_knob.pulled);
        self.baro_reference = self
            .baro_reference
            .transition(push, pull, qfe_available);
        self.baro_setting = self.baro_setting.transition(
            panel.baro_knob.turns,
            self.baro_reference.std,
            panel.baro_is_inhg,
            sync_hpa,
            parameters,
        );
    }

    pub fn outputs(&self, panel: &EfisPanelInput) -> EfisOutputs {
        let (baro_display_mode, baro_value) = if self.baro_reference.std {
            (BaroDisplayMode::Std, 0.)
        } else if panel.baro_is_inhg {
            (BaroDisplayMode::InHg, self.baro_setting.inhg())
        } else {
            (BaroDisplayMode::Hpa, self.baro_setting.hpa())
        };

        EfisOutputs {
            lights: EfisLights::new(self.fd_on, self.ls.output(), self.filter),
            filter: self.filter,
            baro_reference: self.baro_reference.reference(),
            baro_display_mode,
            baro_value,
            baro_setting_hpa: self.baro_setting.hpa(),
            baro_setting_inhg: self.baro_setting.inhg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct NoAutoSwitching;

    impl FlightDirectorAutoSwitching for NoAutoSwitching {
        fn fd_auto_activate(&self) -> bool {
            false
        }

        fn fd_auto_deactivate(&self) -> bool {
            false
        }
    }

    fn buttons(filter: EfisFilter) -> FilterButtons {
        let mut buttons = FilterButtons::default();
        match filter {
            EfisFilter::None => {}
            EfisFilter::Cstr => buttons.cstr = true,
            EfisFilter::Wpt => buttons.wpt = true,
            EfisFilter::Vord => buttons.vord = true,
            EfisFilter::Ndb => buttons.ndb = true,
            EfisFilter::Arpt => buttons.arpt = true,
        }
        buttons
    }

    #[cfg(test)]
    mod efis_filter_tests {
        use super::*;

        #[rstest]
        #[case(EfisFilter::Cstr, EfisFilter::Cstr, EfisFilter::None)]
        #[case(EfisFilter::None, EfisFilter::Cstr, EfisFilter::Cstr)]
        #[case(EfisFilter::Cstr, EfisFilter::Wpt, EfisFilter::Wpt)]
        #[case(EfisFilter::Arpt, EfisFilter::Vord, EfisFilter::Vord)]
        #[case(EfisFilter::Ndb, EfisFilter::None, EfisFilter::Ndb)]
        fn transitions(
            #[case] active: EfisFilter,
            #[case] pressed: EfisFilter,
            #[case] expected: EfisFilter,
        ) {
            assert_eq!(active.transition(&buttons(pressed)), expected);
        }

        #[test]
        fn simultaneous_presses_resolve_by_priority() {
            let pressed = FilterButtons {
                wpt: true,
                ndb: true,
                arpt: true,
                ..Default::default()
            };

            assert_eq!(EfisFilter::None.transition(&pressed), EfisFilter::Wpt);
        }

        #[test]
        fn pressing_active_filter_with_another_clears() {
            let pressed = FilterButtons {
                cstr: true,
                ndb: true,
                ..Default::default()
            };

            assert_eq!(EfisFilter::Ndb.transition(&pressed), EfisFilter::None);
        }
    }

    #[cfg(test)]
    mod baro_reference_tests {
        use super::*;

        #[test]
        fn starts_in_qnh() {
            assert_eq!(
                BaroReferenceSelection::default().reference(),
                BaroReference::Qnh
            );
        }

        #[test]
        fn pull_selects_std_and_push_leaves_it() {
            let std = BaroReferenceSelection::default().transition(false, true, true);
            assert_eq!(std.reference(), BaroReference::Std);

            let qnh = std.transition(true, false, true);
            assert_eq!(qnh.reference(), BaroReference::Qnh);
        }

        #[test]
        fn push_swaps_qnh_and_qfe() {
            let qfe = BaroReferenceSelection::default().transition(true, false, true);
            assert_eq!(qfe.reference(), BaroReference::Qfe);

            let qnh = qfe.transition(true, false, true);
            assert_eq!(qnh.reference(), BaroReference::Qnh);
        }

        #[test]
        fn without_qfe_available_stays_in_qnh() {
            let selection = BaroReferenceSelection::default().transition(true, false, false);

            assert_eq!(selection.reference(), BaroReference::Qnh);
        }

        #[test]
        fn leaving_std_returns_to_previous_reference() {
            let selection = BaroReferenceSelection::default()
                .transition(true, false, true)
                .transition(false, true, true)
                .transition(true, false, true);

            assert_eq!(selection.reference(), BaroReference::Qfe);
        }
    }

    #[cfg(test)]
    mod baro_setting_tests {
        use super::*;

        fn parameters() -> FcuParameters {
            FcuParameters::default()
        }

        #[test]
        fn starts_at_standard_pressure() {
            let setting = BaroSetting::default();

            assert_eq!(setting.hpa(), 1013.);
            assert_eq!(setting.inhg(), 29.92);
        }

        #[test]
        fn hpa_clicks_adjust_both_units() {
            let setting = BaroSetting::default().transition(5, false, false, None, &parameters());

            assert_eq!(setting.hpa(), 1018.);
            assert!((setting.inhg() - 30.06).abs() < 1e-9);
        }

        #[test]
        fn inhg_clicks_adjust_both_units() {
            let setting = BaroSetting::default().transition(-2, false, true, None, &parameters());

            assert!((setting.inhg() - 29.90).abs() < 1e-9);
            assert_eq!(setting.hpa(), 1013.);
        }

        #[rstest]
        #[case(false, 127, 1100.)]
        #[case(false, -128, 745.)]
        fn hpa_is_clamped(#[case] in_inhg: bool, #[case] clicks: i8, #[case] expected: f64) {
            let mut setting = BaroSetting::default();
            for _ in 0..5 {
                setting = setting.transition(clicks, false, in_inhg, None, &parameters());
            }

            assert_eq!(setting.hpa(), expected);
        }

        #[rstest]
        #[case(127, 32.48)]
        #[case(-128, 22.)]
        fn inhg_is_clamped(#[case] clicks: i8, #[case] expected: f64) {
            let mut setting = BaroSetting::default();
            for _ in 0..10 {
                setting = setting.transition(clicks, false, true, None, &parameters());
            }

            assert_eq!(setting.inhg(), expected);
        }

        #[test]
        fn std_ignores_clicks() {
            let setting = BaroSetting::default().transition(10, true, false, None, &parameters());

            assert_eq!(setting, BaroSetting::default());
        }

        #[test]
        fn simulator_sync_overrides_setting() {
            let setting =
                BaroSetting::default().transition(0, false, false, Some(1020.), &parameters());

            assert_eq!(setting.hpa(), 1020.);
            assert!((setting.inhg() - 30.12).abs() < 1e-9);
        }
    }

    #[cfg(test)]
    mod efis_panel_logic_tests {
        use super::*;

        fn update(logic: &mut EfisPanelLogic, panel: &EfisPanelInput) {
            logic.update(
                panel,
                true,
                None,
                &NoAutoSwitching,
                &FcuParameters::default(),
            );
        }

        fn press(logic: &mut EfisPanelLogic, set: impl Fn(&mut EfisPanelInput)) {
            let mut panel = EfisPanelInput::default();
            update(logic, &panel);
            set(&mut panel);
            update(logic, &panel);
            update(logic, &EfisPanelInput::default());
        }

        #[test]
        fn fd_starts_on_and_button_toggles_it() {
            let mut logic = EfisPanelLogic::new("CAPT");
            update(&mut logic, &EfisPanelInput::default());
            assert!(logic.outputs(&EfisPanelInput::default()).lights.fd);

            press(&mut logic, |panel| panel.fd_button_pushed = true);
            assert!(!logic.outputs(&EfisPanelInput::default()).lights.fd);
        }

        #[test]
        fn fd_auto_activation_wins_over_button() {
            struct Activate;
            impl FlightDirectorAutoSwitching for Activate {
                fn fd_auto_activate(&self) -> bool {
                    true
                }
                fn fd_auto_deactivate(&self) -> bool {
                    true
                }
            }

            let mut logic = EfisPanelLogic::new("CAPT");
            let panel = EfisPanelInput::default();
            logic.update(&panel, true, None, &NoAutoSwitching, &FcuParameters::default());
            let mut pressed = panel;
            pressed.fd_button_pushed = true;
            logic.update(&pressed, true, None, &Activate, &FcuParameters::default());

            assert!(logic.outputs(&panel).lights.fd);
        }

        #[test]
        fn ls_button_toggles_ls() {
            let mut logic = EfisPanelLogic::new("CAPT");

            press(&mut logic, |panel| panel.ls_button_pushed = true);

            assert!(logic.outputs(&EfisPanelInput::default()).lights.ls);
        }

        #[test]
        fn filter_button_lights_filter() {
            let mut logic = EfisPanelLogic::new("FO");

            press(&mut logic, |panel| panel.ndb_button_pushed = true);

            let outputs = logic.outputs(&EfisPanelInput::default());
            assert_eq!(outputs.filter, EfisFilter::Ndb);
            assert!(outputs.lights.ndb);
            assert!(!outputs.lights.cstr);
        }

        #[test]
        fn held_filter_button_selects_once() {
            let mut logic = EfisPanelLogic::new("FO");
            let mut panel = EfisPanelInput::default();
            update(&mut logic, &panel);
            panel.wpt_button_pushed = true;
            for _ in 0..5 {
                update(&mut logic, &panel);
            }

            assert_eq!(logic.outputs(&panel).filter, EfisFilter::Wpt);
        }

        #[test]
        fn baro_pull_shows_std() {
            let mut logic = EfisPanelLogic::new("CAPT");

            press(&mut logic, |panel| panel.baro_knob.pulled = true);

            let outputs = logic.outputs(&EfisPanelInput::default());
            assert_eq!(outputs.baro_reference, BaroReference::Std);
            assert_eq!(outputs.baro_display_mode, BaroDisplayMode::Std);
            assert_eq!(outputs.baro_value, 0.);
        }

        #[test]
        fn baro_shows_selected_unit() {
            let mut logic = EfisPanelLogic::new("CAPT");
            let panel = EfisPanelInput {
                baro_is_inhg: true,
                ..Default::default()
            };
            update(&mut logic, &panel);

            let outputs = logic.outputs(&panel);
            assert_eq!(outputs.baro_display_mode, BaroDisplayMode::InHg);
            assert_eq!(outputs.baro_value, 29.92);
        }
    }
}
