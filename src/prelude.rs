//! Makes available common structures needed to set up and run an experiment
//!
//! You may write `use concrete_fem::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Axis, BodyForce, Boundary, DirichletBc, Dof, Error, Parameters, Quantity, Value};
pub use crate::experiment::{AmMultipleLayers, CantileverBeam, Experiment, StrainState, UniaxialCube};
pub use crate::fem::LinearElasticity;
pub use crate::sensor::{DisplacementSensor, ReactionForceSensor, Sensor, Sensors, StrainSensor, StressSensor};
