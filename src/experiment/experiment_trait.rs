use crate::base::{Axis, BodyForce, Boundary, DirichletBc, Error, Parameters, Quantity};
use crate::fem::FunctionSpace;
use gemlab::mesh::{Block, Mesh};

/// Defines the trait for experimental setups
///
/// An experiment holds its parameters and a mesh created once at construction;
/// it derives the boundary conditions on demand.
pub trait Experiment {
    /// Returns the parameters (with units)
    fn parameters(&self) -> &Parameters;

    /// Returns the mesh
    fn mesh(&self) -> &Mesh;

    /// Returns the list of displacement (Dirichlet) boundary conditions
    fn create_displacement_boundary(&self, space: &FunctionSpace) -> Result<Vec<DirichletBc>, Error>;

    /// Returns the body force, if any
    ///
    /// The parameters are the combined parameters of the material problem (e.g., with `rho` and `g`).
    fn create_body_force(&self, _params: &Parameters) -> Result<Option<BodyForce>, Error> {
        Ok(None)
    }

    /// Applies a displacement load, if the experiment supports it
    fn apply_displ_load(&mut self, _displacement: Quantity) -> Result<(), Error> {
        Err(Error::Fem("this experiment does not support displacement loads"))
    }

    /// Returns the space dimension
    fn ndim(&self) -> usize {
        self.mesh().ndim
    }

    /// Returns the maximum coordinate along each axis
    fn extents(&self) -> Vec<f64> {
        let mesh = self.mesh();
        let mut xmax = vec![f64::MIN; mesh.ndim];
        for point in &mesh.points {
            for i in 0..mesh.ndim {
                xmax[i] = f64::max(xmax[i], point.coords[i]);
            }
        }
        xmax
    }

    /// Returns the plane at the bottom (y = 0 in 2D, z = 0 in 3D)
    fn boundary_bottom(&self) -> Boundary {
        Boundary::plane_at(vertical_axis(self.ndim()), 0.0)
    }

    /// Returns the plane at the top (y = height in 2D, z = height in 3D)
    fn boundary_top(&self) -> Boundary {
        let extents = self.extents();
        Boundary::plane_at(vertical_axis(self.ndim()), extents[extents.len() - 1])
    }

    /// Returns the plane at the left side (x = 0)
    fn boundary_left(&self) -> Boundary {
        Boundary::plane_at(Axis::X, 0.0)
    }

    /// Returns the plane at the right side (x = length)
    fn boundary_right(&self) -> Boundary {
        Boundary::plane_at(Axis::X, self.extents()[0])
    }

    /// Returns the plane at the front (y = 0); 3D only
    fn boundary_front(&self) -> Result<Boundary, Error> {
        match self.ndim() {
            3 => Ok(Boundary::plane_at(Axis::Y, 0.0)),
            ndim => Err(Error::WrongDimension(ndim)),
        }
    }

    /// Returns the plane at the back (y = width); 3D only
    fn boundary_back(&self) -> Result<Boundary, Error> {
        match self.ndim() {
            3 => Ok(Boundary::plane_at(Axis::Y, self.extents()[1])),
            ndim => Err(Error::WrongDimension(ndim)),
        }
    }
}

/// Returns the vertical axis (the last one)
pub fn vertical_axis(ndim: usize) -> Axis {
    if ndim == 2 {
        Axis::Y
    } else {
        Axis::Z
    }
}

/// Returns the parameters shared by all experiments
///
/// * `degree = 2` -- polynomial degree of the interpolation
pub fn default_experiment_parameters() -> Parameters {
    let mut params = Parameters::new();
    params.set_dimensionless("degree", 2.0);
    params
}

/// Reads the space dimension, which must be 2 or 3
pub(crate) fn read_dim(params: &Parameters) -> Result<usize, Error> {
    let dim = params.count("dim")?;
    if dim != 2 && dim != 3 {
        return Err(Error::WrongDimension(dim));
    }
    Ok(dim)
}

/// Generates a structured mesh of the box `[0, lx] × [0, ly] (× [0, lz])`
///
/// # Input
///
/// * `lengths` -- the box dimensions (len = ndim)
/// * `ndiv` -- the number of cells along each axis (len = ndim)
/// * `degree` -- the polynomial degree of the interpolation
pub(crate) fn box_mesh(lengths: &[f64], ndiv: &[usize], degree: usize) -> Result<Mesh, Error> {
    let ndim = lengths.len();
    if ndiv.len() != ndim {
        return Err(Error::Fem("the number of divisions must be equal to ndim"));
    }
    if lengths.iter().any(|l| *l <= 0.0) {
        return Err(Error::Fem("the box dimensions must be positive"));
    }
    if ndiv.iter().any(|n| *n < 1) {
        return Err(Error::Fem("the number of divisions must be at least 1"));
    }
    let kind = FunctionSpace::geo_kind(ndim, degree)?;
    let mut block = if ndim == 2 {
        let (lx, ly) = (lengths[0], lengths[1]);
        Block::new(&[[0.0, 0.0], [lx, 0.0], [lx, ly], [0.0, ly]])?
    } else {
        let (lx, ly, lz) = (lengths[0], lengths[1], lengths[2]);
        #[rustfmt::skip]
        let block = Block::new(&[
            [0.0, 0.0, 0.0], [ lx, 0.0, 0.0], [ lx,  ly, 0.0], [0.0,  ly, 0.0],
            [0.0, 0.0,  lz], [ lx, 0.0,  lz], [ lx,  ly,  lz], [0.0,  ly,  lz],
        ])?;
        block
    };
    block.set_ndiv(ndiv)?;
    let mesh = block.subdivide(kind)?;
    log::debug!(
        "generated {:?} mesh with {} points and {} cells",
        kind,
        mesh.points.len(),
        mesh.cells.len()
    );
    Ok(mesh)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{box_mesh, default_experiment_parameters, read_dim, vertical_axis};
    use crate::base::{Axis, Error, Parameters};
    use gemlab::shapes::GeoKind;

    #[test]
    fn box_mesh_works() {
        let mesh = box_mesh(&[2.0, 1.0], &[4, 2], 1).unwrap();
        assert_eq!(mesh.ndim, 2);
        assert_eq!(mesh.cells.len(), 8);
        assert_eq!(mesh.points.len(), 15);
        assert_eq!(mesh.cells[0].kind, GeoKind::Qua4);

        let mesh = box_mesh(&[1.0, 1.0, 1.0], &[2, 2, 2], 2).unwrap();
        assert_eq!(mesh.ndim, 3);
        assert_eq!(mesh.cells.len(), 8);
        assert_eq!(mesh.cells[0].kind, GeoKind::Hex20);
    }

    #[test]
    fn box_mesh_handles_errors() {
        assert!(box_mesh(&[2.0, 1.0], &[4], 1).is_err());
        assert!(box_mesh(&[2.0, 0.0], &[4, 2], 1).is_err());
        assert!(box_mesh(&[2.0, 1.0], &[0, 2], 1).is_err());
        assert!(matches!(box_mesh(&[2.0, 1.0], &[1, 1], 3), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn read_dim_works() {
        let mut params = Parameters::new();
        params.set_dimensionless("dim", 3.0);
        assert_eq!(read_dim(&params).unwrap(), 3);
        params.set_dimensionless("dim", 4.0);
        assert_eq!(
            read_dim(&params).err().unwrap().to_string(),
            "wrong dimension: 4 is not implemented for problem setup"
        );
    }

    #[test]
    fn helpers_work() {
        assert_eq!(vertical_axis(2), Axis::Y);
        assert_eq!(vertical_axis(3), Axis::Z);
        assert_eq!(default_experiment_parameters().count("degree").unwrap(), 2);
    }
}
