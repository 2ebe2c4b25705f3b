use super::input::{AfsPanelInput, FmgcBus, KnobInput};
use super::output::KnobActions;
use super::parameters::FcuParameters;
use std::time::Duration;
use systems::shared::logic::{MonostableTriggerNode, PulseNode, ToggleFlipFlopNode};

struct KnobActionsDetection {
    pushed: MonostableTriggerNode,
    pulled: MonostableTriggerNode,
    turned: MonostableTriggerNode,
}

impl KnobActionsDetection {
    fn new(duration: Duration) -> Self {
        Self {
            pushed: MonostableTriggerNode::new_leading(duration),
            pulled: MonostableTriggerNode::new_leading(duration),
            turned: MonostableTriggerNode::new_leading(duration),
        }
    }

    fn update(&mut self, knob: &KnobInput, delta: Duration) -> KnobActions {
        KnobActions {
            pushed: self.pushed.update(knob.pushed, delta),
            pulled: self.pulled.update(knob.pulled, delta),
            turned: self.turned.update(knob.turns != 0, delta),
        }
    }
}

/// What the AFS panel reports after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct AfsPanelState {
    pub spd_mach: KnobActions,
    pub hdg_trk: KnobActions,
    pub alt: KnobActions,
    pub vs_fpa: KnobActions,
    pub loc_pushed: bool,
    pub exped_pushed: bool,
    pub appr_pushed: bool,
    pub spd_mach_switching_pushed: bool,
    pub trk_fpa_active: bool,
    pub metric_alt_active: bool,
    pub mach_active: bool,
}

pub(super) struct AfsPanelLogic {
    spd_mach: KnobActionsDetection,
    hdg_trk: KnobActionsDetection,
    alt: KnobActionsDetection,
    vs_fpa: KnobActionsDetection,
    loc: MonostableTriggerNode,
    exped: MonostableTriggerNode,
    appr: MonostableTriggerNode,
    spd_mach_switching: MonostableTriggerNode,
    trk_fpa_button: PulseNode,
    trk_fpa_active: bool,
    metric_alt_button: PulseNode,
    metric_alt: ToggleFlipFlopNode,
    state: AfsPanelState,
}

impl AfsPanelLogic {
    pub fn new(parameters: &FcuParameters) -> Self {
        let duration = parameters.button_pulse_duration();
        Self {
            spd_mach: KnobActionsDetection::new(duration),
            hdg_trk: KnobActionsDetection::new(duration),
            alt: KnobActionsDetection::new(duration),
            vs_fpa: KnobActionsDetection::new(duration),
            loc: MonostableTriggerNode::new_leading(duration),
            exped: MonostableTriggerNode::new_leading(duration),
            appr: MonostableTriggerNode::new_leading(duration),
            spd_mach_switching: MonostableTriggerNode::new_leading(duration),
            trk_fpa_button: PulseNode::new_leading(),
            trk_fpa_active: false,
            metric_alt_button: PulseNode::new_leading(),
            metric_alt: ToggleFlipFlopNode::new(false),
            state: AfsPanelState::default(),
        }
    }

    pub fn update(&mut self, delta: Duration, panel: &AfsPanelInput, fmgc_1: &FmgcBus) {
        let trk_fpa_pressed = self.trk_fpa_button.update(panel.trk_fpa_button_pressed);
        // Lateral and vertical modes which only exist in HDG-V/S force the reference back.
        let trk_fpa_reset = fmgc_1.discrete_word_1.bit(15)
            || fmgc_1.discrete_word_1.bit(16)
            || fmgc_1.discrete_word_7.bit(13);
        self.trk_fpa_active = if trk_fpa_reset {
            false
        } else {
            self.trk_fpa_active != trk_fpa_pressed
        };

        let metric_alt_pressed = self
            .metric_alt_button
            .update(panel.metric_alt_button_pressed);

        self.state = AfsPanelState {
            spd_mach: self.spd_mach.update(&panel.spd_knob, delta),
            hdg_trk: self.hdg_trk.update(&panel.hdg_trk_knob, delta),
            alt: self.alt.update(&panel.alt_knob, delta),
            vs_fpa: self.vs_fpa.update(&panel.vs_fpa_knob, delta),
            loc_pushed: self.loc.update(panel.loc_button_pressed, delta),
            exped_pushed: self.exped.update(panel.exped_button_pressed, delta),
            appr_pushed: self.appr.update(panel.appr_button_pressed, delta),
            spd_mach_switching_pushed: self
                .spd_mach_switching
                .update(panel.spd_mach_button_pressed, delta),
            trk_fpa_active: self.trk_fpa_active,
            metric_alt_active: self.metric_alt.update(metric_alt_pressed),
            mach_active: fmgc_1.ats_discrete_word.bit(19),
        };
    }

    pub fn state(&self) -> &AfsPanelState {
        &self.state
    }
}

/// Mode lamps of the AFS panel, decoded from the words of the FMGC with priority.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct AfsModeLamps {
    pub loc: bool,
    pub exped: bool,
    pub appr: bool,
}

impl From<&FmgcBus> for AfsModeLamps {
    fn from(fmgc: &FmgcBus) -> Self {
        let word_1 = &fmgc.discrete_word_1;
        let word_2 = &fmgc.discrete_word_2;
        let word_3 = &fmgc.discrete_word_3;
        let word_4 = &fmgc.discrete_word_4;

        let approach_captured = (word_4.bit(14) || word_3.bit(20))
            && word_4.is_normal()
            && word_3.is_normal();
        let localizer_armed_or_engaged = word_2.bit(13) || word_2.bit(14) || word_3.bit(16);

        Self {
            loc: word_2.is_normal()
                && localizer_armed_or_engaged
                && word_3.is_normal()
                && !approach_captured,
            exped: word_1.bit(24) && word_1.is_normal(),
            appr: approach_captured
                || (word_3.is_normal() && (word_3.bit(23) || word_1.bit(23)) && word_1.is_normal()),
        }
    }
}
