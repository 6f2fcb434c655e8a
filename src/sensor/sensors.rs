use super::Sensor;
use crate::base::Error;
use crate::fem::LinearElasticity;

/// Holds the sensors attached to a problem, keyed by their names
///
/// Inserting a sensor whose name already exists renames it by appending
/// `2`, `3`, … to the name.
#[derive(Default)]
pub struct Sensors {
    all: Vec<Box<dyn Sensor>>,
}

impl Sensors {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        Sensors { all: Vec::new() }
    }

    /// Inserts a sensor and returns its (possibly new) name
    pub fn insert(&mut self, mut sensor: Box<dyn Sensor>) -> String {
        let initial = sensor.name().to_string();
        let mut name = initial.clone();
        let mut i = 2;
        while self.contains(&name) {
            name = format!("{}{}", initial, i);
            i += 1;
        }
        if name != initial {
            log::info!("renaming sensor '{}' to '{}'", initial, name);
            sensor.data_mut().set_name(&name);
        }
        self.all.push(sensor);
        name
    }

    /// Returns whether a sensor with the given name exists or not
    pub fn contains(&self, name: &str) -> bool {
        self.all.iter().any(|s| s.name() == name)
    }

    /// Returns a sensor
    pub fn get(&self, name: &str) -> Result<&dyn Sensor, Error> {
        match self.all.iter().find(|s| s.name() == name) {
            Some(sensor) => Ok(sensor.as_ref()),
            None => Err(Error::UnknownSensor(name.to_string())),
        }
    }

    /// Renames a sensor
    ///
    /// Returns [Error::DuplicateSensor] if another sensor already uses the new name.
    pub fn rename(&mut self, name: &str, new_name: &str) -> Result<(), Error> {
        if name != new_name && self.contains(new_name) {
            return Err(Error::DuplicateSensor(new_name.to_string()));
        }
        self.get_mut(name)?.data_mut().set_name(new_name);
        Ok(())
    }

    /// Returns a mutable sensor
    pub fn get_mut(&mut self, name: &str) -> Result<&mut (dyn Sensor + 'static), Error> {
        match self.all.iter_mut().find(|s| s.name() == name) {
            Some(sensor) => Ok(sensor.as_mut()),
            None => Err(Error::UnknownSensor(name.to_string())),
        }
    }

    /// Returns the names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.all.iter().map(|s| s.name()).collect()
    }

    /// Returns an iterator over the sensors in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn Sensor>> {
        self.all.iter()
    }

    /// Returns the number of sensors
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns whether there are no sensors
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Asks all sensors to measure the solved problem
    ///
    /// Either every sensor records the time `t` or none does: if one sensor fails,
    /// the entries appended by the others during this call are removed.
    pub fn measure(&mut self, problem: &LinearElasticity, t: f64) -> Result<(), Error> {
        let lengths: Vec<_> = self.all.iter().map(|s| s.data().len()).collect();
        for index in 0..self.all.len() {
            if let Err(err) = self.all[index].measure(problem, t) {
                log::warn!("sensor '{}' failed at t = {:?}: {}", self.all[index].name(), t, err);
                for (sensor, len) in self.all.iter_mut().zip(&lengths) {
                    sensor.data_mut().truncate(*len);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Removes the measurements of all sensors
    pub fn clear_data(&mut self) {
        for sensor in self.all.iter_mut() {
            sensor.data_mut().clear();
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
