//! Implements the finite element method for linear elasticity

mod calculate_strain;
mod element_solid;
mod file_io_write_vtu;
mod function_space;
mod linear_elasticity;
mod linear_system;
mod point_locator;
pub(crate) use crate::fem::calculate_strain::*;
pub use crate::fem::element_solid::*;
pub use crate::fem::function_space::*;
pub use crate::fem::linear_elasticity::*;
pub use crate::fem::linear_system::*;
pub use crate::fem::point_locator::*;
