//! Implements sensors that measure solved problems and keep a history of values

mod point_sensors;
mod reaction_force_sensor;
mod sensor_data;
mod sensor_trait;
mod sensors;
pub use crate::sensor::point_sensors::*;
pub use crate::sensor::reaction_force_sensor::*;
pub use crate::sensor::sensor_data::*;
pub use crate::sensor::sensor_trait::*;
pub use crate::sensor::sensors::*;
