use super::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};
use uom::si::f64::{
    Acceleration, Force, Length, Mass, MassDensity, Pressure, Ratio, ThermodynamicTemperature, Time,
};
use uom::si::{force, length, mass, pressure, ratio, thermodynamic_temperature, time};

/// Holds the exponents of the SI base dimensions (mass, length, time, temperature)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub mass: i32,
    pub length: i32,
    pub time: i32,
    pub temperature: i32,
}

impl Dimension {
    pub const NONE: Dimension = Dimension::new(0, 0, 0, 0);
    pub const MASS: Dimension = Dimension::new(1, 0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(0, 1, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1);
    pub const FORCE: Dimension = Dimension::new(1, 1, -2, 0);
    pub const PRESSURE: Dimension = Dimension::new(1, -1, -2, 0);
    pub const DENSITY: Dimension = Dimension::new(1, -3, 0, 0);
    pub const ACCELERATION: Dimension = Dimension::new(0, 1, -2, 0);

    /// Allocates a new instance
    pub const fn new(mass: i32, length: i32, time: i32, temperature: i32) -> Self {
        Dimension {
            mass,
            length,
            time,
            temperature,
        }
    }

    /// Raises the dimension to an integer power
    pub fn powi(self, n: i32) -> Self {
        Dimension::new(self.mass * n, self.length * n, self.time * n, self.temperature * n)
    }

    /// Returns the symbol of the SI base unit for this dimension
    ///
    /// Force and pressure use their derived symbols (N and Pa); everything else
    /// is composed from `kg`, `m`, `s` and `K`, e.g. `kg*m^-3`.
    pub fn base_symbol(&self) -> String {
        if *self == Dimension::FORCE {
            return "N".to_string();
        }
        if *self == Dimension::PRESSURE {
            return "Pa".to_string();
        }
        let mut parts = Vec::new();
        for (symbol, exponent) in [
            ("kg", self.mass),
            ("m", self.length),
            ("s", self.time),
            ("K", self.temperature),
        ] {
            match exponent {
                0 => (),
                1 => parts.push(symbol.to_string()),
                _ => parts.push(format!("{}^{}", symbol, exponent)),
            }
        }
        parts.join("*")
    }
}

impl Mul for Dimension {
    type Output = Dimension;
    fn mul(self, rhs: Dimension) -> Dimension {
        Dimension::new(
            self.mass + rhs.mass,
            self.length + rhs.length,
            self.time + rhs.time,
            self.temperature + rhs.temperature,
        )
    }
}

impl Div for Dimension {
    type Output = Dimension;
    fn div(self, rhs: Dimension) -> Dimension {
        self * rhs.powi(-1)
    }
}

/// Returns the SI factor and dimension of a single unit symbol
///
/// The factors are taken from `uom` so that the same definitions are used by
/// the typed (compile-time) and the parsed (runtime) paths.
fn lookup_symbol(symbol: &str) -> Option<(f64, Dimension)> {
    let found = match symbol {
        "" | "1" | "dimensionless" => (1.0, Dimension::NONE),
        "%" | "percent" => (Ratio::new::<ratio::percent>(1.0).value, Dimension::NONE),
        "m" | "meter" => (Length::new::<length::meter>(1.0).value, Dimension::LENGTH),
        "km" => (Length::new::<length::kilometer>(1.0).value, Dimension::LENGTH),
        "cm" => (Length::new::<length::centimeter>(1.0).value, Dimension::LENGTH),
        "mm" => (Length::new::<length::millimeter>(1.0).value, Dimension::LENGTH),
        "um" | "µm" => (Length::new::<length::micrometer>(1.0).value, Dimension::LENGTH),
        "kg" => (Mass::new::<mass::kilogram>(1.0).value, Dimension::MASS),
        "g" | "gram" => (Mass::new::<mass::gram>(1.0).value, Dimension::MASS),
        "t" | "tonne" => (Mass::new::<mass::megagram>(1.0).value, Dimension::MASS),
        "s" | "second" => (Time::new::<time::second>(1.0).value, Dimension::TIME),
        "min" | "minute" => (Time::new::<time::minute>(1.0).value, Dimension::TIME),
        "h" | "hour" => (Time::new::<time::hour>(1.0).value, Dimension::TIME),
        "d" | "day" => (Time::new::<time::day>(1.0).value, Dimension::TIME),
        "K" | "kelvin" => (
            ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(1.0).value,
            Dimension::TEMPERATURE,
        ),
        "N" | "newton" => (Force::new::<force::newton>(1.0).value, Dimension::FORCE),
        "kN" => (Force::new::<force::kilonewton>(1.0).value, Dimension::FORCE),
        "MN" => (Force::new::<force::meganewton>(1.0).value, Dimension::FORCE),
        "Pa" | "pascal" => (Pressure::new::<pressure::pascal>(1.0).value, Dimension::PRESSURE),
        "kPa" => (Pressure::new::<pressure::kilopascal>(1.0).value, Dimension::PRESSURE),
        "MPa" => (Pressure::new::<pressure::megapascal>(1.0).value, Dimension::PRESSURE),
        "GPa" => (Pressure::new::<pressure::gigapascal>(1.0).value, Dimension::PRESSURE),
        _ => return None,
    };
    Some(found)
}

/// Holds a unit given by a (runtime) expression such as `kg/m^3` or `N/m^2`
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    /// The expression used to create this unit
    pub symbol: String,

    /// Multiplier converting a value in this unit to SI base units
    pub factor: f64,

    /// Physical dimension
    pub dimension: Dimension,
}

impl Unit {
    /// Parses a unit expression
    ///
    /// Terms are unit symbols with an optional integer exponent (`m^3`, `s^-2`),
    /// combined left-to-right with `*` or `/`. An empty expression is dimensionless.
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let unknown = || Error::UnknownUnit(expression.to_string());
        let mut factor = 1.0;
        let mut dimension = Dimension::NONE;
        let mut divide = false;
        let mut term = String::new();
        let mut terms = Vec::new();
        for c in expression.chars() {
            match c {
                '*' | '·' | '/' => {
                    terms.push((divide, term.trim().to_string()));
                    term.clear();
                    divide = c == '/';
                }
                _ => term.push(c),
            }
        }
        terms.push((divide, term.trim().to_string()));
        let single = terms.len() == 1;
        for (divide, term) in terms {
            if term.is_empty() && !single {
                return Err(unknown());
            }
            let (symbol, exponent) = match term.split_once('^') {
                Some((s, e)) => (s.trim(), e.trim().parse::<i32>().map_err(|_| unknown())?),
                None => (term.as_str(), 1),
            };
            let (f, d) = lookup_symbol(symbol).ok_or_else(unknown)?;
            let exponent = if divide { -exponent } else { exponent };
            factor *= f.powi(exponent);
            dimension = dimension * d.powi(exponent);
        }
        Ok(Unit {
            symbol: expression.trim().to_string(),
            factor,
            dimension,
        })
    }

    /// Returns the SI base unit of a dimension
    pub fn base(dimension: Dimension) -> Self {
        Unit {
            symbol: dimension.base_symbol(),
            factor: 1.0,
            dimension,
        }
    }

    /// Returns the factor converting values in `self` to values in `other`
    pub fn conversion_factor(&self, other: &Unit) -> Result<f64, Error> {
        if self.dimension != other.dimension {
            return Err(Error::IncompatibleUnits {
                from: self.symbol.clone(),
                to: other.symbol.clone(),
            });
        }
        Ok(self.factor / other.factor)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Holds a magnitude with a physical unit, stored in SI base units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "QuantityJson", try_from = "QuantityJson")]
pub struct Quantity {
    value: f64,
    dimension: Dimension,
}

/// Holds the JSON representation of a quantity
#[derive(Serialize, Deserialize)]
struct QuantityJson {
    value: f64,
    unit: String,
}

impl Quantity {
    /// Allocates a new instance given a value in the unit described by `unit`
    pub fn new(value: f64, unit: &str) -> Result<Self, Error> {
        Ok(Quantity::from_unit(value, &Unit::parse(unit)?))
    }

    /// Allocates a new instance given a value in a parsed unit
    pub fn from_unit(value: f64, unit: &Unit) -> Self {
        Quantity {
            value: value * unit.factor,
            dimension: unit.dimension,
        }
    }

    /// Allocates a dimensionless quantity
    pub fn dimensionless(value: f64) -> Self {
        Quantity {
            value,
            dimension: Dimension::NONE,
        }
    }

    /// Parses a string such as `42 cm` or `7750 kg/m^3`
    ///
    /// Returns `None` if the string does not start with a number.
    pub fn parse(text: &str) -> Option<Result<Self, Error>> {
        let text = text.trim();
        let (number, unit) = match text.find(char::is_whitespace) {
            Some(i) => (&text[..i], &text[i..]),
            None => (text, ""),
        };
        let value = number.parse::<f64>().ok()?;
        Some(Quantity::new(value, unit))
    }

    /// Returns the magnitude in SI base units
    pub fn magnitude(&self) -> f64 {
        self.value
    }

    /// Returns the physical dimension
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns the SI base unit of this quantity
    pub fn base_unit(&self) -> Unit {
        Unit::base(self.dimension)
    }

    /// Returns the magnitude expressed in another unit
    pub fn value_in(&self, unit: &str) -> Result<f64, Error> {
        let target = Unit::parse(unit)?;
        let factor = self.base_unit().conversion_factor(&target)?;
        Ok(self.value * factor)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.dimension.base_symbol();
        if symbol.is_empty() {
            write!(f, "{:?}", self.value)
        } else {
            write!(f, "{:?} {}", self.value, symbol)
        }
    }
}

impl From<Quantity> for QuantityJson {
    fn from(quantity: Quantity) -> Self {
        QuantityJson {
            value: quantity.value,
            unit: quantity.dimension.base_symbol(),
        }
    }
}

impl TryFrom<QuantityJson> for Quantity {
    type Error = Error;
    fn try_from(json: QuantityJson) -> Result<Self, Error> {
        Quantity::new(json.value, &json.unit)
    }
}

macro_rules! impl_from_uom {
    ($($ty:ty => $dim:expr),* $(,)?) => {
        $(
            impl From<$ty> for Quantity {
                fn from(q: $ty) -> Self {
                    Quantity { value: q.value, dimension: $dim }
                }
            }
        )*
    };
}

impl_from_uom! {
    Ratio => Dimension::NONE,
    Length => Dimension::LENGTH,
    Mass => Dimension::MASS,
    Time => Dimension::TIME,
    ThermodynamicTemperature => Dimension::TEMPERATURE,
    Force => Dimension::FORCE,
    Pressure => Dimension::PRESSURE,
    MassDensity => Dimension::DENSITY,
    Acceleration => Dimension::ACCELERATION,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dimension, Quantity, Unit};
    use crate::base::Error;
    use russell_lab::approx_eq;
    use uom::si::f64::{Length, Pressure};
    use uom::si::length::centimeter;
    use uom::si::pressure::megapascal;

    #[test]
    fn parse_simple_units_works() {
        let mm = Unit::parse("mm").unwrap();
        assert_eq!(mm.dimension, Dimension::LENGTH);
        approx_eq(mm.factor, 1e-3, 1e-15);

        let none = Unit::parse("").unwrap();
        assert_eq!(none.dimension, Dimension::NONE);
        assert_eq!(none.factor, 1.0);

        let gpa = Unit::parse("GPa").unwrap();
        assert_eq!(gpa.dimension, Dimension::PRESSURE);
        approx_eq(gpa.factor, 1e9, 1e-6);
    }

    #[test]
    fn parse_compound_units_works() {
        let density = Unit::parse("kg/m^3").unwrap();
        assert_eq!(density.dimension, Dimension::DENSITY);
        assert_eq!(density.factor, 1.0);

        let stress = Unit::parse("N/m^2").unwrap();
        assert_eq!(stress.dimension, Dimension::PRESSURE);

        let gravity = Unit::parse("m/s^2").unwrap();
        assert_eq!(gravity.dimension, Dimension::ACCELERATION);

        let composed = Unit::parse("kg*m^-1*s^-2").unwrap();
        assert_eq!(composed.dimension, Dimension::PRESSURE);

        let per_cm2 = Unit::parse("N / cm^2").unwrap();
        approx_eq(per_cm2.factor, 1e4, 1e-10);
    }

    #[test]
    fn parse_handles_errors() {
        assert!(matches!(Unit::parse("furlong"), Err(Error::UnknownUnit(_))));
        assert!(matches!(Unit::parse("m^x"), Err(Error::UnknownUnit(_))));
        assert!(matches!(Unit::parse("m/"), Err(Error::UnknownUnit(_))));
    }

    #[test]
    fn base_symbol_works() {
        assert_eq!(Dimension::LENGTH.base_symbol(), "m");
        assert_eq!(Dimension::FORCE.base_symbol(), "N");
        assert_eq!(Dimension::PRESSURE.base_symbol(), "Pa");
        assert_eq!(Dimension::DENSITY.base_symbol(), "kg*m^-3");
        assert_eq!(Dimension::ACCELERATION.base_symbol(), "m*s^-2");
        assert_eq!(Dimension::NONE.base_symbol(), "");
        // base symbols can be parsed back
        for dim in [Dimension::DENSITY, Dimension::ACCELERATION, Dimension::PRESSURE] {
            assert_eq!(Unit::parse(&dim.base_symbol()).unwrap().dimension, dim);
        }
    }

    #[test]
    fn quantity_is_stored_in_base_units() {
        let q = Quantity::new(42.0, "cm").unwrap();
        approx_eq(q.magnitude(), 0.42, 1e-15);
        assert_eq!(q.dimension(), Dimension::LENGTH);
        approx_eq(q.value_in("mm").unwrap(), 420.0, 1e-12);
        assert_eq!(
            q.value_in("s").err().unwrap().to_string(),
            "cannot convert 'm' to 's' because the dimensions differ"
        );
        assert_eq!(format!("{}", q), "0.42 m");
        assert_eq!(format!("{}", Quantity::dimensionless(2.0)), "2.0");
    }

    #[test]
    fn quantity_parse_works() {
        let q = Quantity::parse("6000 mm").unwrap().unwrap();
        approx_eq(q.magnitude(), 6.0, 1e-12);
        let q = Quantity::parse("3").unwrap().unwrap();
        assert_eq!(q.dimension(), Dimension::NONE);
        assert!(Quantity::parse("plane_stress").is_none());
        assert!(Quantity::parse("1.0 parsec").unwrap().is_err());
    }

    #[test]
    fn from_uom_works() {
        let q: Quantity = Length::new::<centimeter>(42.0).into();
        assert_eq!(q, Quantity::new(42.0, "cm").unwrap());
        let q: Quantity = Pressure::new::<megapascal>(30.0).into();
        approx_eq(q.magnitude(), 30e6, 1e-6);
        assert_eq!(q.dimension(), Dimension::PRESSURE);
    }

    #[test]
    fn serialize_works() {
        let q = Quantity::new(7.75, "g/cm^3").unwrap();
        let json = serde_json::to_string(&q).unwrap();
        let read: Quantity = serde_json::from_str(&json).unwrap();
        approx_eq(read.magnitude(), 7750.0, 1e-9);
        assert_eq!(read.dimension(), Dimension::DENSITY);
    }
}
