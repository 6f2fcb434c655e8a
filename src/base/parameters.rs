use super::{Dimension, Error, Quantity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

/// Holds a parameter value: a physical quantity or a text option
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A magnitude with unit, stored in SI base units
    Quantity(Quantity),

    /// An option such as `"plane_stress"`
    Text(String),
}

impl From<Quantity> for Value {
    fn from(quantity: Quantity) -> Self {
        Value::Quantity(quantity)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

macro_rules! impl_value_from_uom {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(q: $ty) -> Self {
                    Value::Quantity(q.into())
                }
            }
        )*
    };
}

impl_value_from_uom! {
    uom::si::f64::Ratio,
    uom::si::f64::Length,
    uom::si::f64::Mass,
    uom::si::f64::Time,
    uom::si::f64::ThermodynamicTemperature,
    uom::si::f64::Force,
    uom::si::f64::Pressure,
    uom::si::f64::MassDensity,
    uom::si::f64::Acceleration,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Quantity(q) => write!(f, "{}", q),
            Value::Text(t) => write!(f, "{:?}", t),
        }
    }
}

/// Holds named parameters with physical units
///
/// All quantities are normalized to SI base units when inserted; e.g., `42 cm`
/// is stored as `0.42 m`.
///
/// # Examples
///
/// ```
/// use concrete_fem::base::{Parameters, Quantity};
///
/// let mut p = Parameters::new();
/// p.set("length", Quantity::new(42.0, "cm").unwrap());
/// assert_eq!(p.magnitude("length").unwrap(), 0.42);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    all: BTreeMap<String, Value>,
}

impl Parameters {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        Parameters { all: BTreeMap::new() }
    }

    /// Reads parameters from a JSON string
    ///
    /// See [Parameters::update_from_json] for the accepted values.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut params = Parameters::new();
        params.update_from_json(&value)?;
        Ok(params)
    }

    /// Sets (or replaces) a parameter
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> &mut Self {
        self.all.insert(key.to_string(), value.into());
        self
    }

    /// Sets (or replaces) a dimensionless parameter
    pub fn set_dimensionless(&mut self, key: &str, value: f64) -> &mut Self {
        self.set(key, Quantity::dimensionless(value))
    }

    /// Removes a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.all.remove(key)
    }

    /// Merges another set of parameters into this one, overriding existing keys
    pub fn update(&mut self, other: &Parameters) -> &mut Self {
        for (key, value) in &other.all {
            self.all.insert(key.clone(), value.clone());
        }
        self
    }

    /// Merges parameters given as a JSON object, overriding existing keys
    ///
    /// Accepted values:
    ///
    /// * `{"value": 6000, "unit": "mm"}` -- a quantity
    /// * `"6000 mm"` -- a quantity (a string starting with a number)
    /// * `"plane_stress"` -- a text option
    ///
    /// A bare number has no unit and yields [Error::MissingUnit]; in that case
    /// no parameter is changed.
    pub fn update_from_json(&mut self, json: &serde_json::Value) -> Result<&mut Self, Error> {
        let object = json
            .as_object()
            .ok_or_else(|| Error::invalid("<root>", "must be a JSON object"))?;
        let mut incoming = Parameters::new();
        for (key, value) in object {
            let value = match value {
                serde_json::Value::Number(_) => return Err(Error::MissingUnit(key.clone())),
                serde_json::Value::String(text) => match Quantity::parse(text) {
                    Some(quantity) => Value::Quantity(quantity?),
                    None => Value::Text(text.clone()),
                },
                serde_json::Value::Object(_) => Value::Quantity(serde_json::from_value(value.clone())?),
                _ => return Err(Error::invalid(key, "must be a quantity or a text")),
            };
            incoming.all.insert(key.clone(), value);
        }
        Ok(self.update(&incoming))
    }

    /// Returns a parameter
    pub fn get(&self, key: &str) -> Result<&Value, Error> {
        self.all.get(key).ok_or_else(|| Error::MissingParameter(key.to_string()))
    }

    /// Returns a parameter that must be a quantity
    pub fn quantity(&self, key: &str) -> Result<Quantity, Error> {
        match self.get(key)? {
            Value::Quantity(q) => Ok(*q),
            Value::Text(_) => Err(Error::invalid(key, "must be a quantity, not a text")),
        }
    }

    /// Returns the magnitude (in SI base units) of a quantity
    pub fn magnitude(&self, key: &str) -> Result<f64, Error> {
        Ok(self.quantity(key)?.magnitude())
    }

    /// Returns the magnitude (in SI base units) of a quantity with a given dimension
    ///
    /// A quantity of any other dimension is rejected; e.g., `50 kg` or a unitless
    /// `0.02` are not accepted where a length is expected.
    pub fn magnitude_of(&self, key: &str, dimension: Dimension) -> Result<f64, Error> {
        let q = self.quantity(key)?;
        if q.dimension() == dimension {
            return Ok(q.magnitude());
        }
        let reason = if dimension == Dimension::NONE {
            format!("must be dimensionless, got {}", q)
        } else {
            format!("must be given in units of {}, got {}", dimension.base_symbol(), q)
        };
        Err(Error::invalid(key, &reason))
    }

    /// Returns a dimensionless non-negative integer such as a number of elements
    pub fn count(&self, key: &str) -> Result<usize, Error> {
        let value = self
            .magnitude_of(key, Dimension::NONE)
            .map_err(|_| Error::invalid(key, "must be dimensionless"))?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(Error::invalid(key, "must be a non-negative integer"));
        }
        Ok(value as usize)
    }

    /// Returns a text option
    pub fn text(&self, key: &str) -> Result<&str, Error> {
        match self.get(key)? {
            Value::Text(t) => Ok(t.as_str()),
            Value::Quantity(_) => Err(Error::invalid(key, "must be a text, not a quantity")),
        }
    }

    /// Returns whether a parameter exists or not
    pub fn contains(&self, key: &str) -> bool {
        self.all.contains_key(key)
    }

    /// Returns an iterator over the keys (sorted)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.all.keys().map(|k| k.as_str())
    }

    /// Returns the number of parameters
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

impl Add for Parameters {
    type Output = Parameters;

    /// Merges two sets; on conflicting keys the right-hand side wins
    fn add(mut self, rhs: Parameters) -> Parameters {
        self.update(&rhs);
        self
    }
}

impl Add<Option<Parameters>> for Parameters {
    type Output = Parameters;
    fn add(self, rhs: Option<Parameters>) -> Parameters {
        match rhs {
            Some(other) => self + other,
            None => self,
        }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.all {
            writeln!(f, "{} = {}", key, value)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
