//! Concrete-fem -- Experiment setups and sensors for linear elastic simulations of concrete
//!
//! This crate generates the meshes, boundary conditions and body forces of typical
//! experiments (e.g., layers printed by additive manufacturing and uniaxially loaded
//! cubes), solves the linear elastic problem, and records measurements with sensors.
//!
//! All parameters carry physical units and are stored in SI base units.
//!
//! # Example
//!
//! ```
//! use concrete_fem::prelude::*;
//!
//! fn main() -> Result<(), Error> {
//!     // experiment
//!     let mut params = AmMultipleLayers::default_parameters();
//!     params.set_dimensionless("num_layers", 2.0).set_dimensionless("degree", 1.0);
//!     let experiment = AmMultipleLayers::new(&params)?;
//!
//!     // material
//!     let mut material = Parameters::new();
//!     material
//!         .set("rho", Quantity::new(2070.0, "kg/m^3")?)
//!         .set("E", Quantity::new(30.0, "GPa")?)
//!         .set_dimensionless("nu", 0.2);
//!
//!     // solve and measure
//!     let mut problem = LinearElasticity::new(Box::new(experiment), &material)?;
//!     problem.add_sensor(Box::new(ReactionForceSensor::new(None, None)));
//!     problem.solve(1.0)?;
//!     let reaction = problem.sensors().get("ReactionForceSensor")?.get_last_entry()?;
//!     assert!(reaction[1] < 0.0);
//!     Ok(())
//! }
//! ```

pub mod base;
pub mod experiment;
pub mod fem;
pub mod material;
pub mod prelude;
pub mod sensor;
