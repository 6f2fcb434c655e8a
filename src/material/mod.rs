//! Implements material models

mod idealization;
mod linear_elastic;
pub use crate::material::idealization::*;
pub use crate::material::linear_elastic::*;
