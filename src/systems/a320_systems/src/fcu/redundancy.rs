use super::input::{FcuDiscreteInputs, FcuInput, FmgcBus};
use super::output::ChosenFmgcData;
use log::debug;

/// FMGC 1 keeps priority as long as its autopilot is engaged, or, with AP 2 disengaged, its
/// flight director or its autothrust path is active.
pub(super) fn fmgc_1_has_priority(discretes: &FcuDiscreteInputs) -> bool {
    discretes.ap_1_engaged
        || (!discretes.ap_2_engaged && discretes.fd_1_engaged)
        || (!discretes.ap_2_engaged && !discretes.fd_2_engaged && discretes.athr_1_engaged)
}

pub(super) trait FmgcPriority {
    fn fmgc_1_has_priority(&self) -> bool;
}

/// Selects the FMGC whose words the FCU uses. No check is made on the validity of the selected
/// words: when both computers are failed the priority rule still picks one and its invalid words
/// read as their defaults downstream.
pub(super) struct FmgcSelection {
    fmgc_1_has_priority: Option<bool>,
}

impl Default for FmgcSelection {
    fn default() -> Self {
        Self {
            fmgc_1_has_priority: None,
        }
    }
}

impl FmgcSelection {
    pub fn update(&mut self, discretes: &FcuDiscreteInputs) {
        let priority = fmgc_1_has_priority(discretes);
        if let Some(previous) = self.fmgc_1_has_priority {
            if previous != priority {
                debug!(
                    "FCU switched to FMGC {} words",
                    if priority { 1 } else { 2 }
                );
            }
        }
        self.fmgc_1_has_priority = Some(priority);
    }

    pub fn selected<'a>(&self, input: &'a FcuInput) -> &'a FmgcBus {
        if self.fmgc_1_has_priority() {
            &input.fmgc_1
        } else {
            &input.fmgc_2
        }
    }
}

impl FmgcPriority for FmgcSelection {
    fn fmgc_1_has_priority(&self) -> bool {
        self.fmgc_1_has_priority.unwrap_or(true)
    }
}

impl From<&FmgcBus> for ChosenFmgcData {
    fn from(bus: &FmgcBus) -> Self {
        Self {
            cas_kts: bus.cas_kts.value_or_default(0.),
            mach: bus.mach.value_or_default(0.),
            heading_deg: bus.heading_deg.value_or_default(0.),
            track_deg: bus.track_deg.value_or_default(0.),
            altitude_ft: bus.altitude_ft.value_or_default(0.),
            vertical_speed_ft_min: bus.vertical_speed_ft_min.value_or_default(0.),
            fpa_deg: bus.fpa_deg.value_or_default(0.),
        }
    }
}
