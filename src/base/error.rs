use thiserror::Error;

/// Defines the errors returned by this crate
///
/// Errors coming from `gemlab` and `russell` are plain static strings;
/// they are wrapped by [Error::Fem] so that `?` works everywhere.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested space dimension is neither 2 nor 3
    #[error("wrong dimension: {0} is not implemented for problem setup")]
    WrongDimension(usize),

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{0}' must carry a physical unit")]
    MissingUnit(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("cannot convert '{from}' to '{to}' because the dimensions differ")]
    IncompatibleUnits { from: String, to: String },

    #[error("parameter '{key}' {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("sensor '{0}' has no recorded data")]
    NoData(String),

    #[error("cannot find sensor '{0}'")]
    UnknownSensor(String),

    #[error("a sensor named '{0}' already exists")]
    DuplicateSensor(String),

    #[error("sensor '{name}' has no data at time {time}")]
    NoDataAtTime { name: String, time: f64 },

    #[error("cannot find a cell containing the point {0:?}")]
    PointOutsideMesh(Vec<f64>),

    #[error("{0}")]
    Fem(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

impl From<&'static str> for Error {
    fn from(message: &'static str) -> Self {
        Error::Fem(message)
    }
}

impl Error {
    /// Returns an [Error::InvalidParameter] for the given key
    pub(crate) fn invalid(key: &str, reason: &str) -> Self {
        Error::InvalidParameter {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_works() {
        assert_eq!(
            Error::WrongDimension(4).to_string(),
            "wrong dimension: 4 is not implemented for problem setup"
        );
        assert_eq!(
            Error::MissingParameter("rho".to_string()).to_string(),
            "missing required parameter 'rho'"
        );
        assert_eq!(
            Error::invalid("dim", "must be an integer").to_string(),
            "parameter 'dim' must be an integer"
        );
    }

    #[test]
    fn from_str_error_works() {
        let err: Error = "cannot find any point".into();
        assert_eq!(err.to_string(), "cannot find any point");
        assert!(matches!(err, Error::Fem(_)));
    }
}
