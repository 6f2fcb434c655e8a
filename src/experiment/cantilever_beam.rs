use super::{box_mesh, default_experiment_parameters, read_dim, Experiment};
use crate::base::{BodyForce, Dimension, DirichletBc, Error, Parameters};
use crate::fem::FunctionSpace;
use gemlab::mesh::Mesh;
use uom::si::f64::Length;
use uom::si::length::meter;

/// Implements a beam clamped on the left side and loaded by its own weight
pub struct CantileverBeam {
    parameters: Parameters,
    mesh: Mesh,
}

impl CantileverBeam {
    /// Allocates a new instance and generates the mesh
    pub fn new(parameters: &Parameters) -> Result<Self, Error> {
        let mut all = default_experiment_parameters();
        all.update(parameters);
        let dim = read_dim(&all)?;
        let degree = all.count("degree")?;
        let length = all.magnitude_of("length", Dimension::LENGTH)?;
        let height = all.magnitude_of("height", Dimension::LENGTH)?;
        let nx = all.count("num_elements_length")?;
        let nh = all.count("num_elements_height")?;
        log::debug!("setup {}D cantilever beam", dim);
        let mesh = if dim == 2 {
            box_mesh(&[length, height], &[nx, nh], degree)?
        } else {
            let width = all.magnitude_of("width", Dimension::LENGTH)?;
            let nw = all.count("num_elements_width")?;
            box_mesh(&[length, width, height], &[nx, nw, nh], degree)?
        };
        Ok(CantileverBeam { parameters: all, mesh })
    }

    /// Returns a set of working parameters
    pub fn default_parameters() -> Parameters {
        let mut params = Parameters::new();
        params
            .set_dimensionless("dim", 3.0)
            .set("length", Length::new::<meter>(1.0))
            .set("height", Length::new::<meter>(0.3))
            .set("width", Length::new::<meter>(0.3)) // 3D only
            .set_dimensionless("num_elements_length", 10.0)
            .set_dimensionless("num_elements_height", 3.0)
            .set_dimensionless("num_elements_width", 3.0); // 3D only
        params
    }
}

impl Experiment for CantileverBeam {
    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Clamps the left side
    fn create_displacement_boundary(&self, space: &FunctionSpace) -> Result<Vec<DirichletBc>, Error> {
        let left = self.boundary_left().point_ids(&self.mesh)?;
        Ok(space
            .dofs()
            .iter()
            .map(|dof| DirichletBc::new(left.clone(), *dof, 0.0))
            .collect())
    }

    fn create_body_force(&self, params: &Parameters) -> Result<Option<BodyForce>, Error> {
        let rho = params.magnitude_of("rho", Dimension::DENSITY)?;
        let g = params.magnitude_of("g", Dimension::ACCELERATION)?;
        Ok(Some(BodyForce::gravity(self.mesh.ndim, rho, g)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
