use super::{Sensor, SensorData};
use crate::base::{Dimension, Error};
use crate::fem::LinearElasticity;

/// Measures the displacement vector at a point
pub struct DisplacementSensor {
    data: SensorData,
    location: Vec<f64>,
}

/// Measures the strain tensor at a point
///
/// The values are the `ndim × ndim` components of the tensor (row-major).
pub struct StrainSensor {
    data: SensorData,
    location: Vec<f64>,
}

/// Measures the stress tensor at a point
///
/// The values are the `ndim × ndim` components of the tensor (row-major).
pub struct StressSensor {
    data: SensorData,
    location: Vec<f64>,
}

impl DisplacementSensor {
    /// Allocates a new instance
    ///
    /// The location is `[x, y, z]`; `z` is ignored in 2D. The default name is `DisplacementSensor`.
    pub fn new(location: &[f64], name: Option<&str>) -> Self {
        DisplacementSensor {
            data: SensorData::new(name.unwrap_or("DisplacementSensor"), Dimension::LENGTH),
            location: location.to_vec(),
        }
    }

    /// Returns the location
    pub fn location(&self) -> &[f64] {
        &self.location
    }
}

impl StrainSensor {
    /// Allocates a new instance (default name: `StrainSensor`)
    pub fn new(location: &[f64], name: Option<&str>) -> Self {
        StrainSensor {
            data: SensorData::new(name.unwrap_or("StrainSensor"), Dimension::NONE),
            location: location.to_vec(),
        }
    }

    /// Returns the location
    pub fn location(&self) -> &[f64] {
        &self.location
    }
}

impl StressSensor {
    /// Allocates a new instance (default name: `StressSensor`)
    pub fn new(location: &[f64], name: Option<&str>) -> Self {
        StressSensor {
            data: SensorData::new(name.unwrap_or("StressSensor"), Dimension::PRESSURE),
            location: location.to_vec(),
        }
    }

    /// Returns the location
    pub fn location(&self) -> &[f64] {
        &self.location
    }
}

impl Sensor for DisplacementSensor {
    fn data(&self) -> &SensorData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SensorData {
        &mut self.data
    }

    fn measure(&mut self, problem: &LinearElasticity, t: f64) -> Result<(), Error> {
        let value = problem.displacement_at(&self.location)?;
        self.data.push(t, value);
        Ok(())
    }
}

impl Sensor for StrainSensor {
    fn data(&self) -> &SensorData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SensorData {
        &mut self.data
    }

    fn measure(&mut self, problem: &LinearElasticity, t: f64) -> Result<(), Error> {
        let value = problem.strain_at(&self.location)?;
        self.data.push(t, value);
        Ok(())
    }
}

impl Sensor for StressSensor {
    fn data(&self) -> &SensorData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SensorData {
        &mut self.data
    }

    fn measure(&mut self, problem: &LinearElasticity, t: f64) -> Result<(), Error> {
        let value = problem.stress_at(&self.location)?;
        self.data.push(t, value);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
