use crate::parameters::{ensure_duration, ensure_ordered, seconds, ParameterError, Parameters};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FcuParameters {
    /// Duration of the self-test run after power is restored from a power supply fault.
    pub self_test_duration_s: f64,
    /// A power outage lasting longer than this stops the program.
    pub power_outage_fault_threshold_s: f64,
    /// How long a push, pull or button press is reported to the guidance computers.
    pub button_pulse_duration_s: f64,
    pub baro_hpa_min: f64,
    pub baro_hpa_max: f64,
    pub baro_inhg_min: f64,
    pub baro_inhg_max: f64,
}

impl Default for FcuParameters {
    fn default() -> Self {
        Self {
            self_test_duration_s: 4.,
            power_outage_fault_threshold_s: 0.02,
            button_pulse_duration_s: 0.1,
            baro_hpa_min: 745.,
            baro_hpa_max: 1100.,
            baro_inhg_min: 22.,
            baro_inhg_max: 32.48,
        }
    }
}

impl FcuParameters {
    pub fn self_test_duration(&self) -> Duration {
        seconds(self.self_test_duration_s)
    }

    pub fn power_outage_fault_threshold(&self) -> Duration {
        seconds(self.power_outage_fault_threshold_s)
    }

    pub fn button_pulse_duration(&self) -> Duration {
        seconds(self.button_pulse_duration_s)
    }
}

impl Parameters for FcuParameters {
    const NAME: &'static str = "FCU";

    fn validate(&self) -> Result<(), ParameterError> {
        ensure_duration("self_test_duration_s", self.self_test_duration_s)?;
        ensure_duration(
            "power_outage_fault_threshold_s",
            self.power_outage_fault_threshold_s,
        )?;
        ensure_duration("button_pulse_duration_s", self.button_pulse_duration_s)?;
        ensure_ordered("baro_hpa_min", self.baro_hpa_min, self.baro_hpa_max)?;
        ensure_ordered("baro_inhg_min", self.baro_inhg_min, self.baro_inhg_max)
    }
}
