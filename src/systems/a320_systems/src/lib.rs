pub mod autothrust;
pub mod fcu;
mod parameters;

pub use parameters::{ParameterError, Parameters};
