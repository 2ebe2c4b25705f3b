use super::clamp;
use std::time::Duration;

/// Limits how fast a signal may change. Rates are per second, their sign is ignored.
pub struct RateLimiter {
    up: f64,
    down: f64,
    initial: f64,
    output: Option<f64>,
}

impl RateLimiter {
    pub fn new(up: f64, down: f64, initial: f64) -> Self {
        Self {
            up: up.abs(),
            down: down.abs(),
            initial,
            output: None,
        }
    }

    /// The first update outputs the initial value regardless of the input.
    pub fn update(&mut self, input: f64, delta: Duration) -> f64 {
        let output = match self.output {
            None => self.initial,
            Some(previous) => {
                let dt = delta.as_secs_f64();
                previous + clamp(input - previous, -self.down * dt, self.up * dt)
            }
        };
        self.output = Some(output);
        output
    }

    pub fn set_rates(&mut self, up: f64, down: f64) {
        self.up = up.abs();
        self.down = down.abs();
    }

    /// Restarts the limiter from the given value on the next update.
    pub fn reset_to(&mut self, initial: f64) {
        self.initial = initial;
        self.output = None;
    }

    pub fn output(&self) -> f64 {
        self.output.unwrap_or(self.initial)
    }
}

/// Integrates a rate and keeps the result within `[min, max]`. The limits may change every
/// update.
pub struct LimitedIntegrator {
    initial: f64,
    output: f64,
}

impl LimitedIntegrator {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            output: initial,
        }
    }

    pub fn update(&mut self, rate: f64, delta: Duration, min: f64, max: f64) -> f64 {
        self.output = clamp(self.output + rate * delta.as_secs_f64(), min, max);
        self.output
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn reset(&mut self) {
        self.output = self.initial;
    }

    pub fn reset_to(&mut self, value: f64) {
        self.output = value;
    }
}
