use super::SensorData;
use crate::base::{Error, Unit};
use crate::fem::LinearElasticity;

/// Defines the trait for sensors that measure a solved problem
///
/// Each call to [Sensor::measure] appends exactly one entry to the history.
pub trait Sensor {
    /// Returns the history of measurements
    fn data(&self) -> &SensorData;

    /// Returns the (mutable) history of measurements
    fn data_mut(&mut self) -> &mut SensorData;

    /// Measures the solved problem at time `t` and appends the result to the history
    fn measure(&mut self, problem: &LinearElasticity, t: f64) -> Result<(), Error>;

    /// Returns the name
    fn name(&self) -> &str {
        self.data().name()
    }

    /// Returns the unit used to report the values
    fn units(&self) -> &Unit {
        self.data().units()
    }

    /// Sets the unit used to report the values
    fn set_units(&mut self, unit: &str) -> Result<(), Error> {
        self.data_mut().set_units(unit)
    }

    /// Returns the most recent measurement
    fn get_last_entry(&self) -> Result<Vec<f64>, Error> {
        self.data().get_last_entry()
    }

    /// Returns all measurements
    fn get_data_list(&self) -> Result<Vec<Vec<f64>>, Error> {
        self.data().get_data_list()
    }

    /// Returns the time of all measurements
    fn get_time_list(&self) -> &[f64] {
        self.data().get_time_list()
    }

    /// Returns the measurement at time `t`
    fn get_data_at_time(&self, t: f64) -> Result<Vec<f64>, Error> {
        self.data().get_data_at_time(t)
    }
}
