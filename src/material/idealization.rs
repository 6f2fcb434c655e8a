use crate::base::{Dimension, Error, Parameters};
use russell_tensor::Mandel;

/// Defines the geometry idealization (plane-strain, plane-stress, none)
///
/// # Default values
///
/// * The default thickness value is **1.0** for all cases
/// * In 2D, the default choice is **plane-strain**
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Idealization {
    /// Indicates 2D instead of 3D
    pub two_dim: bool,

    /// Indicates a plane-stress idealization in 2D
    pub plane_stress: bool,

    /// Holds the out-of-plane thickness (default = 1.0)
    pub thickness: f64,
}

impl Idealization {
    /// Allocates a new instance
    ///
    /// # Default values
    ///
    /// * `2D`: plane-strain with thickness = 1.0
    /// * `3D`: no idealization with thickness = 1.0
    pub fn new(ndim: usize) -> Self {
        Idealization {
            two_dim: ndim == 2,
            plane_stress: false,
            thickness: 1.0,
        }
    }

    /// Allocates a new instance using the `stress_state` and `thickness` parameters
    ///
    /// Both parameters are optional and only relevant in 2D.
    /// The `stress_state` may be `"plane_stress"` or `"plane_strain"` (case insensitive).
    pub fn from_parameters(ndim: usize, params: &Parameters) -> Result<Self, Error> {
        let mut ideal = Idealization::new(ndim);
        if !ideal.two_dim {
            return Ok(ideal);
        }
        if params.contains("stress_state") {
            ideal.plane_stress = match params.text("stress_state")?.to_lowercase().as_str() {
                "plane_stress" => true,
                "plane_strain" => false,
                _ => return Err(Error::invalid("stress_state", "must be plane_stress or plane_strain")),
            };
        }
        if params.contains("thickness") {
            ideal.thickness = params.magnitude_of("thickness", Dimension::LENGTH)?;
            if ideal.thickness <= 0.0 {
                return Err(Error::invalid("thickness", "must be positive"));
            }
        }
        Ok(ideal)
    }

    /// Returns the symmetric Mandel representation associated with the idealization
    ///
    /// # Results
    ///
    /// * `2D`: [Mandel::Symmetric2D]
    /// * `3D`: [Mandel::Symmetric]
    pub fn mandel(&self) -> Mandel {
        if self.two_dim {
            Mandel::Symmetric2D
        } else {
            Mandel::Symmetric
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Idealization;
    use crate::base::{Parameters, Quantity};
    use russell_lab::approx_eq;
    use russell_tensor::Mandel;

    #[test]
    fn derive_works() {
        let ideal = Idealization::new(2);
        let mut clone = ideal.clone();
        assert_eq!(
            format!("{:?}", ideal),
            "Idealization { two_dim: true, plane_stress: false, thickness: 1.0 }"
        );
        clone.plane_stress = true;
        clone.thickness = 0.5;
        assert_eq!(
            format!("{:?}", clone),
            "Idealization { two_dim: true, plane_stress: true, thickness: 0.5 }"
        );
    }

    #[test]
    fn mandel_works() {
        let ideal = Idealization::new(2);
        assert_eq!(ideal.mandel(), Mandel::Symmetric2D);

        let ideal = Idealization::new(3);
        assert_eq!(ideal.mandel(), Mandel::Symmetric);
    }

    #[test]
    fn from_parameters_works() {
        let mut params = Parameters::new();
        params
            .set("stress_state", "Plane_Stress")
            .set("thickness", Quantity::new(5.0, "cm").unwrap());
        let ideal = Idealization::from_parameters(2, &params).unwrap();
        assert!(ideal.plane_stress);
        approx_eq(ideal.thickness, 0.05, 1e-15);

        // ignored in 3D
        let ideal = Idealization::from_parameters(3, &params).unwrap();
        assert_eq!(ideal, Idealization::new(3));

        params.set("stress_state", "axisymmetric");
        assert_eq!(
            Idealization::from_parameters(2, &params).err().unwrap().to_string(),
            "parameter 'stress_state' must be plane_stress or plane_strain"
        );
    }
}
