pub mod arinc429;
pub mod filters;
pub mod interpolation;
pub mod logic;
pub mod rate_limiter;

/// Clamps a value into `[min, max]` without panicking when the bounds are inverted, in which case
/// the upper bound wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
