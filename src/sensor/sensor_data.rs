use crate::base::{Dimension, Error, Unit};

/// Holds the history of measurements of a sensor
///
/// The values are stored in SI base units and converted to the reporting unit
/// (see [SensorData::set_units]) when retrieved.
#[derive(Clone, Debug)]
pub struct SensorData {
    name: String,
    base_unit: Unit,
    unit: Unit,
    time: Vec<f64>,
    data: Vec<Vec<f64>>,
}

impl SensorData {
    /// Allocates a new instance
    pub fn new(name: &str, dimension: Dimension) -> Self {
        SensorData {
            name: name.to_string(),
            base_unit: Unit::base(dimension),
            unit: Unit::base(dimension),
            time: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Returns the name of the sensor
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name of the sensor
    ///
    /// Names are unique within [super::Sensors]; renaming goes through [super::Sensors::rename].
    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Returns the SI base unit of the measured quantity
    pub fn base_unit(&self) -> &Unit {
        &self.base_unit
    }

    /// Returns the unit used to report the values
    pub fn units(&self) -> &Unit {
        &self.unit
    }

    /// Sets the unit used to report the values, e.g., `"mm"` for displacements
    pub fn set_units(&mut self, unit: &str) -> Result<(), Error> {
        let unit = Unit::parse(unit)?;
        self.base_unit.conversion_factor(&unit)?;
        self.unit = unit;
        Ok(())
    }

    /// Appends a measurement given in SI base units
    pub fn push(&mut self, t: f64, value: Vec<f64>) {
        self.time.push(t);
        self.data.push(value);
    }

    /// Returns the number of measurements
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns whether there are no measurements
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the most recent measurement
    pub fn get_last_entry(&self) -> Result<Vec<f64>, Error> {
        match self.data.last() {
            Some(value) => self.convert(value),
            None => Err(Error::NoData(self.name.clone())),
        }
    }

    /// Returns all measurements
    pub fn get_data_list(&self) -> Result<Vec<Vec<f64>>, Error> {
        self.data.iter().map(|value| self.convert(value)).collect()
    }

    /// Returns the time of all measurements
    pub fn get_time_list(&self) -> &[f64] {
        &self.time
    }

    /// Returns the measurement recorded at time `t`
    pub fn get_data_at_time(&self, t: f64) -> Result<Vec<f64>, Error> {
        let tol = f64::EPSILON * f64::max(1.0, f64::abs(t));
        match self.time.iter().position(|time| f64::abs(time - t) <= tol) {
            Some(index) => self.convert(&self.data[index]),
            None => Err(Error::NoDataAtTime {
                name: self.name.clone(),
                time: t,
            }),
        }
    }

    /// Drops the measurements recorded after the first `len` ones
    pub(crate) fn truncate(&mut self, len: usize) {
        self.time.truncate(len);
        self.data.truncate(len);
    }

    /// Removes all measurements
    pub fn clear(&mut self) {
        self.time.clear();
        self.data.clear();
    }

    fn convert(&self, value: &[f64]) -> Result<Vec<f64>, Error> {
        let factor = self.base_unit.conversion_factor(&self.unit)?;
        Ok(value.iter().map(|v| v * factor).collect())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
