//! Implements the base structures for the experiment setups: errors, units, parameters and boundaries

mod boundary;
mod error;
mod parameters;
mod units;
pub use crate::base::boundary::*;
pub use crate::base::error::*;
pub use crate::base::parameters::*;
pub use crate::base::units::*;
