use super::Idealization;
use crate::base::{Dimension, Error, Parameters};
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Tensor2, Tensor4};

/// Implements a linear elastic model
pub struct LinearElastic {
    /// Holds the geometry idealization
    pub ideal: Idealization,

    /// Holds the elasticity tensor calculator
    pub model: LinElasticity,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, young: f64, poisson: f64) -> Self {
        LinearElastic {
            ideal: *ideal,
            model: LinElasticity::new(young, poisson, ideal.two_dim, ideal.plane_stress),
        }
    }

    /// Allocates a new instance using the `E` (Young's modulus) and `nu` (Poisson's coefficient) parameters
    pub fn from_parameters(ideal: &Idealization, params: &Parameters) -> Result<Self, Error> {
        let young = params.magnitude_of("E", Dimension::PRESSURE)?;
        let poisson = params.magnitude_of("nu", Dimension::NONE)?;
        if young <= 0.0 {
            return Err(Error::invalid("E", "must be positive"));
        }
        if poisson <= -1.0 || poisson >= 0.5 {
            return Err(Error::invalid("nu", "must be in (-1, 0.5)"));
        }
        Ok(LinearElastic::new(ideal, young, poisson))
    }

    /// Returns the (constant) elastic modulus D
    pub fn modulus(&self) -> &Tensor4 {
        self.model.get_modulus()
    }

    /// Calculates the stress tensor given the strain tensor
    pub fn calc_stress(&self, stress: &mut Tensor2, strain: &Tensor2) {
        t4_ddot_t2_update(stress, 1.0, self.model.get_modulus(), strain, 0.0); // σ = D : ε
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
