//! Implements the experimental setups: geometry, mesh, boundary conditions and loads

mod am_multiple_layers;
mod cantilever_beam;
mod experiment_trait;
mod uniaxial_cube;
pub use crate::experiment::am_multiple_layers::*;
pub use crate::experiment::cantilever_beam::*;
pub use crate::experiment::experiment_trait::*;
pub use crate::experiment::uniaxial_cube::*;
