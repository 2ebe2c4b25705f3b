//! First order continuous filters, discretized with the bilinear (Tustin) transform.
//!
//! Every filter is seeded with its first input: previous input and previous output both take the
//! value of the first sample, so the output starts without a transient.

use std::time::Duration;

#[derive(Clone, Copy)]
struct FilterState {
    previous_input: f64,
    previous_output: f64,
}

impl FilterState {
    fn seeded(input: f64) -> Self {
        Self {
            previous_input: input,
            previous_output: input,
        }
    }
}

/// Low pass filter `C1 / (s + C1)`.
pub struct LagFilter {
    cutoff: f64,
    state: Option<FilterState>,
}

impl LagFilter {
    pub fn new(cutoff: f64) -> Self {
        Self {
            cutoff,
            state: None,
        }
    }

    pub fn update(&mut self, input: f64, delta: Duration) -> f64 {
        let state = self.state.unwrap_or_else(|| FilterState::seeded(input));
        let dt_c1 = delta.as_secs_f64() * self.cutoff;
        let denominator = dt_c1 + 2.;
        let a = dt_c1 / denominator;

        let output = (2. - dt_c1) / denominator * state.previous_output
            + a * (input + state.previous_input);

        self.state = Some(FilterState {
            previous_input: input,
            previous_output: output,
        });
        output
    }

    pub fn output(&self) -> f64 {
        self.state.map_or(0., |state| state.previous_output)
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// High pass filter `s / (s + C1)`. Removes the steady state of its input.
///
/// Seeding input and output with the first sample, as all filters here do, means the steady
/// state of the first sample is only washed out progressively.
pub struct WashoutFilter {
    cutoff: f64,
    state: Option<FilterState>,
}

impl WashoutFilter {
    pub fn new(cutoff: f64) -> Self {
        Self {
            cutoff,
            state: None,
        }
    }

    pub fn update(&mut self, input: f64, delta: Duration) -> f64 {
        let state = self.state.unwrap_or_else(|| FilterState::seeded(input));
        let dt_c1 = delta.as_secs_f64() * self.cutoff;
        let denominator = dt_c1 + 2.;
        let a = 2. / denominator;

        let output = (2. - dt_c1) / denominator * state.previous_output + a * input
            - a * state.previous_input;

        self.state = Some(FilterState {
            previous_input: input,
            previous_output: output,
        });
        output
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// Lead-lag filter `(C1 s + C2) / (C3 s + C4)`.
pub struct LeadLagFilter {
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
    state: Option<FilterState>,
}

impl LeadLagFilter {
    pub fn new(c1: f64, c2: f64, c3: f64, c4: f64) -> Self {
        Self {
            c1,
            c2,
            c3,
            c4,
            state: None,
        }
    }

    pub fn update(&mut self, input: f64, delta: Duration) -> f64 {
        let state = self.state.unwrap_or_else(|| FilterState::seeded(input));
        let dt = delta.as_secs_f64();
        let denominator = 2. * self.c3 + dt * self.c4;

        let output = (2. * self.c1 + dt * self.c2) / denominator * input
            + (dt * self.c2 - 2. * self.c1) / denominator * state.previous_input
            + (2. * self.c3 - dt * self.c4) / denominator * state.previous_output;

        self.state = Some(FilterState {
            previous_input: input,
            previous_output: output,
        });
        output
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME: Duration = Duration::from_millis(30);

    fn run(mut update: impl FnMut(f64) -> f64, input: f64, frames: usize) -> f64 {
        (0..frames).fold(0., |_, _| update(input))
    }

    #[cfg(test)]
    mod lag_filter_tests {
        use super::*;

        #[test]
        fn when_first_sample_outputs_it() {
            let mut filter = LagFilter::new(2.);
            assert_eq!(filter.update(15., FRAME), 15.);
        }

        #[test]
        fn when_step_converges_to_input() {
            let mut filter = LagFilter::new(2.);
            filter.update(0., FRAME);

            let output = run(|input| filter.update(input, FRAME), 10., 500);

            assert!((output - 10.).abs() < 1e-6);
        }

        #[test]
        fn when_step_lags_behind() {
            let mut filter = LagFilter::new(2.);
            filter.update(0., FRAME);

            let output = filter.update(10., FRAME);

            assert!(output > 0. && output < 10.);
        }

        #[test]
        fn when_reset_reseeds() {
            let mut filter = LagFilter::new(2.);
            filter.update(0., FRAME);
            filter.update(10., FRAME);
            filter.reset();

            assert_eq!(filter.update(-3., FRAME), -3.);
        }
    }

    #[cfg(test)]
    mod washout_filter_tests {
        use super::*;

        #[test]
        fn when_step_passes_transient_then_decays() {
            let mut filter = WashoutFilter::new(1.);
            filter.update(0., FRAME);

            let transient = filter.update(10., FRAME);
            let settled = run(|input| filter.update(input, FRAME), 10., 1000);

            assert!(transient > 9.);
            assert!(settled.abs() < 1e-6);
        }
    }

    #[cfg(test)]
    mod lead_lag_filter_tests {
        use super::*;

        #[test]
        fn when_step_converges_to_static_gain() {
            let mut filter = LeadLagFilter::new(0.5, 1., 2., 1.);
            filter.update(0., FRAME);

            let output = run(|input| filter.update(input, FRAME), 4., 2000);

            assert!((output - 4.).abs() < 1e-6);
        }

        #[test]
        fn when_lead_dominates_overshoots() {
            let mut filter = LeadLagFilter::new(3., 1., 1., 1.);
            filter.update(0., FRAME);

            assert!(filter.update(1., FRAME) > 1.);
        }
    }

    proptest! {
        #[test]
        fn constant_input_is_a_fixed_point(
            input in -1000.0..1000.0_f64,
            frame_ms in 1_u64..100,
        ) {
            let delta = Duration::from_millis(frame_ms);
            let mut lag = LagFilter::new(3.);
            let mut lead_lag = LeadLagFilter::new(0.2, 1., 0.7, 1.);

            for _ in 0..5 {
                prop_assert!((lag.update(input, delta) - input).abs() < 1e-9);
                prop_assert!((lead_lag.update(input, delta) - input).abs() < 1e-9);
            }
        }

        #[test]
        fn washout_of_constant_input_decays_towards_zero(
            input in -1000.0..1000.0_f64,
            frame_ms in 1_u64..100,
        ) {
            let delta = Duration::from_millis(frame_ms);
            let mut washout = WashoutFilter::new(3.);

            let mut previous = washout.update(input, delta).abs();
            for _ in 0..10 {
                let output = washout.update(input, delta).abs();
                prop_assert!(output <= previous + 1e-9);
                previous = output;
            }
        }
    }
}
