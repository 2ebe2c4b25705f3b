use crate::parameters::{
    ensure_duration, ensure_non_negative, seconds, ParameterError, Parameters,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use systems::shared::interpolation::Table1D;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutothrustParameters {
    /// How long the instinctive disconnect must be held to disable the autothrust.
    pub disconnect_disable_time_s: f64,
    /// How long the A/THR pushbutton must be released before a new push is recognized.
    pub push_rearm_time_s: f64,
    /// Modes are only shown once the autothrust has been engaged for this long.
    pub mode_guard_time_s: f64,
    /// Time between SRS TO or GA engaging and the autothrust engaging.
    pub toga_engagement_delay_s: f64,
    /// An alpha floor inhibition by TCAS is released after TCAS has been active this long.
    pub tcas_inhibit_release_time_s: f64,
    pub toga_lever_warning_time_s: f64,
    pub flex_lever_warning_time_s: f64,
    /// Above this compression a gear strut indicates that the aircraft is on ground.
    pub strut_compression_ground_threshold: f64,
    pub n1_rate_up_percent_per_s: f64,
    pub n1_rate_down_percent_per_s: f64,
    pub n1_rate_retard_percent_per_s: f64,
    pub thrust_idle_rate_percent_per_s: f64,
    pub thrust_climb_mct_rate_percent_per_s: f64,
    pub retard_rate_percent_per_s: f64,
    /// N1 rate per knot of speed error, scheduled on the speed error in knots.
    pub speed_error_gain: Table1D,
    /// N1 rate per knot per second of filtered acceleration.
    pub acceleration_gain: f64,
    pub acceleration_filter_cutoff: f64,
    pub lever_gain_up: f64,
    pub lever_gain_down: f64,
    pub lever_position_limit: f64,
}

impl Default for AutothrustParameters {
    fn default() -> Self {
        Self {
            disconnect_disable_time_s: 15.,
            push_rearm_time_s: 0.1,
            mode_guard_time_s: 0.1,
            toga_engagement_delay_s: 0.3,
            tcas_inhibit_release_time_s: 5.,
            toga_lever_warning_time_s: 3.,
            flex_lever_warning_time_s: 4.,
            strut_compression_ground_threshold: 0.05,
            n1_rate_up_percent_per_s: 3.,
            n1_rate_down_percent_per_s: 3.,
            n1_rate_retard_percent_per_s: 10.,
            thrust_idle_rate_percent_per_s: -10.,
            thrust_climb_mct_rate_percent_per_s: 10.,
            retard_rate_percent_per_s: -10.,
            speed_error_gain: Self::default_speed_error_gain(),
            acceleration_gain: 1.5,
            acceleration_filter_cutoff: 1.,
            lever_gain_up: 1.,
            lever_gain_down: 0.5,
            lever_position_limit: 20.,
        }
    }
}

impl AutothrustParameters {
    fn default_speed_error_gain() -> Table1D {
        Table1D::new(
            vec![-20., -10., 0., 10., 20.],
            vec![0.6, 0.5, 0.4, 0.5, 0.6],
        )
        .unwrap_or_else(|_| Table1D::flat(0.4))
    }

    pub fn disconnect_disable_time(&self) -> Duration {
        seconds(self.disconnect_disable_time_s)
    }

    pub fn push_rearm_time(&self) -> Duration {
        seconds(self.push_rearm_time_s)
    }

    pub fn mode_guard_time(&self) -> Duration {
        seconds(self.mode_guard_time_s)
    }

    pub fn toga_engagement_delay(&self) -> Duration {
        seconds(self.toga_engagement_delay_s)
    }

    pub fn tcas_inhibit_release_time(&self) -> Duration {
        seconds(self.tcas_inhibit_release_time_s)
    }

    pub fn toga_lever_warning_time(&self) -> Duration {
        seconds(self.toga_lever_warning_time_s)
    }

    pub fn flex_lever_warning_time(&self) -> Duration {
        seconds(self.flex_lever_warning_time_s)
    }
}

impl Parameters for AutothrustParameters {
    const NAME: &'static str = "autothrust";

    fn validate(&self) -> Result<(), ParameterError> {
        ensure_duration("disconnect_disable_time_s", self.disconnect_disable_time_s)?;
        ensure_duration("push_rearm_time_s", self.push_rearm_time_s)?;
        ensure_duration("mode_guard_time_s", self.mode_guard_time_s)?;
        ensure_duration("toga_engagement_delay_s", self.toga_engagement_delay_s)?;
        ensure_duration(
            "tcas_inhibit_release_time_s",
            self.tcas_inhibit_release_time_s,
        )?;
        ensure_duration("toga_lever_warning_time_s", self.toga_lever_warning_time_s)?;
        ensure_duration("flex_lever_warning_time_s", self.flex_lever_warning_time_s)?;
        ensure_non_negative(
            "strut_compression_ground_threshold",
            self.strut_compression_ground_threshold,
        )?;
        ensure_non_negative("lever_position_limit", self.lever_position_limit)?;
        ensure_non_negative("n1_rate_up_percent_per_s", self.n1_rate_up_percent_per_s)?;
        ensure_non_negative("n1_rate_down_percent_per_s", self.n1_rate_down_percent_per_s)?;
        ensure_non_negative(
            "n1_rate_retard_percent_per_s",
            self.n1_rate_retard_percent_per_s,
        )
    }
}
