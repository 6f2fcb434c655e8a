use crate::base::{Dof, Error};
use gemlab::mesh::{Cell, Mesh, PointId};
use gemlab::shapes::GeoKind;

/// Holds the vector-valued (displacement) function space over a mesh
///
/// Each mesh point carries `ndim` displacement DOFs and the equation numbers
/// are given by `eq = point_id * ndim + dof`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSpace {
    /// Space dimension (2 or 3)
    pub ndim: usize,

    /// Polynomial degree of the interpolation (1 or 2)
    pub degree: usize,

    /// Number of points in the mesh
    pub n_point: usize,

    /// Total number of equations (DOFs)
    pub n_equation: usize,
}

impl FunctionSpace {
    /// Allocates a new instance
    ///
    /// All cells must have the same kind, which defines the polynomial degree.
    pub fn new(mesh: &Mesh) -> Result<Self, Error> {
        let ndim = mesh.ndim;
        if ndim != 2 && ndim != 3 {
            return Err(Error::WrongDimension(ndim));
        }
        let first = mesh.cells.first().ok_or(Error::Fem("there are no cells in the mesh"))?;
        if mesh.cells.iter().any(|cell| cell.kind != first.kind) {
            return Err(Error::Fem("all cells must have the same kind"));
        }
        let degree = match first.kind {
            GeoKind::Qua4 | GeoKind::Hex8 => 1,
            GeoKind::Qua8 | GeoKind::Qua9 | GeoKind::Hex20 => 2,
            _ => return Err(Error::Fem("cell kind is not available for the displacement function space")),
        };
        let n_point = mesh.points.len();
        Ok(FunctionSpace {
            ndim,
            degree,
            n_point,
            n_equation: n_point * ndim,
        })
    }

    /// Returns the cell kind used for a given space dimension and polynomial degree
    ///
    /// | degree | 2D   | 3D    |
    /// |:------:|:----:|:-----:|
    /// | 1      | Qua4 | Hex8  |
    /// | 2      | Qua9 | Hex20 |
    pub fn geo_kind(ndim: usize, degree: usize) -> Result<GeoKind, Error> {
        match (ndim, degree) {
            (2, 1) => Ok(GeoKind::Qua4),
            (2, 2) => Ok(GeoKind::Qua9),
            (3, 1) => Ok(GeoKind::Hex8),
            (3, 2) => Ok(GeoKind::Hex20),
            (2, _) | (3, _) => Err(Error::invalid("degree", "must be 1 or 2")),
            _ => Err(Error::WrongDimension(ndim)),
        }
    }

    /// Returns the DOFs at each point
    pub fn dofs(&self) -> &'static [Dof] {
        Dof::all(self.ndim)
    }

    /// Returns the equation number corresponding to (PointId, DOF)
    pub fn eq(&self, point_id: PointId, dof: Dof) -> Result<usize, Error> {
        if point_id >= self.n_point {
            return Err(Error::Fem("cannot find equation number because PointId is out-of-bounds"));
        }
        if dof.index() >= self.ndim {
            return Err(Error::Fem("cannot find equation number because DOF is not available"));
        }
        Ok(point_id * self.ndim + dof.index())
    }

    /// Returns the local-to-global map of equations of a cell
    ///
    /// The local numbering is `m * ndim + dof` where `m` is the local node index.
    pub fn local_to_global(&self, cell: &Cell) -> Vec<usize> {
        let mut l2g = Vec::with_capacity(cell.points.len() * self.ndim);
        for point_id in &cell.points {
            for i in 0..self.ndim {
                l2g.push(point_id * self.ndim + i);
            }
        }
        l2g
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
