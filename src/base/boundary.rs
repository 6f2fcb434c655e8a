use super::Error;
use gemlab::mesh::{At, Features, Mesh, PointId};
use gemlab::util::any_x;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the coordinate axes
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// Returns the axis with the given index (0, 1 or 2)
    pub fn from_index(index: usize) -> Result<Self, Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            _ => Err(Error::WrongDimension(index + 1)),
        }
    }

    /// Returns the index of this axis
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Defines a geometric region of the mesh boundary
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Boundary {
    /// All boundary points with `x[axis] == value`
    Plane { axis: Axis, value: f64 },

    /// The single point with the given coordinates
    Point(Vec<f64>),
}

impl Boundary {
    /// Allocates a new plane boundary
    pub fn plane_at(axis: Axis, value: f64) -> Self {
        Boundary::Plane { axis, value }
    }

    /// Allocates a new point boundary
    pub fn point_at(coords: &[f64]) -> Self {
        Boundary::Point(coords.to_vec())
    }

    /// Returns the search criterion for gemlab
    fn at(&self, ndim: usize) -> Result<At, Error> {
        match self {
            Boundary::Plane { axis, value } => {
                if axis.index() >= ndim {
                    return Err(Error::WrongDimension(ndim));
                }
                Ok(match axis {
                    Axis::X => At::X(*value),
                    Axis::Y => At::Y(*value),
                    Axis::Z => At::Z(*value),
                })
            }
            Boundary::Point(x) => {
                if x.len() < ndim {
                    return Err(Error::WrongDimension(x.len()));
                }
                if ndim == 2 {
                    Ok(At::XY(x[0], x[1]))
                } else {
                    Ok(At::XYZ(x[0], x[1], x[2]))
                }
            }
        }
    }

    /// Returns the (sorted) ids of the mesh points on this boundary
    pub fn point_ids(&self, mesh: &Mesh) -> Result<Vec<PointId>, Error> {
        let features = Features::new(mesh, false);
        self.point_ids_with(mesh.ndim, &features)
    }

    /// Returns the (sorted) ids of the points on this boundary using existing features
    pub fn point_ids_with(&self, ndim: usize, features: &Features) -> Result<Vec<PointId>, Error> {
        let mut ids = features.search_point_ids(self.at(ndim)?, any_x)?;
        ids.sort();
        Ok(ids)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Plane { axis, value } => write!(f, "{:?} = {:?}", axis, value),
            Boundary::Point(x) => write!(f, "point {:?}", x),
        }
    }
}

/// Defines the displacement degrees-of-freedom
///
/// Note: The fixed numbering scheme assists in sorting the DOFs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,
}

impl Dof {
    /// Returns the displacement DOF along an axis
    pub fn along(axis: Axis) -> Self {
        match axis {
            Axis::X => Dof::Ux,
            Axis::Y => Dof::Uy,
            Axis::Z => Dof::Uz,
        }
    }

    /// Returns all displacement DOFs for the space dimension
    pub fn all(ndim: usize) -> &'static [Dof] {
        if ndim == 2 {
            &[Dof::Ux, Dof::Uy]
        } else {
            &[Dof::Ux, Dof::Uy, Dof::Uz]
        }
    }

    /// Returns the local index (direction) of this DOF
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Holds a Dirichlet (essential) boundary condition
#[derive(Clone, Debug, PartialEq)]
pub struct DirichletBc {
    /// Points where the DOF is prescribed
    pub points: Vec<PointId>,

    /// The prescribed DOF
    pub dof: Dof,

    /// The prescribed value in SI base units
    pub value: f64,
}

impl DirichletBc {
    /// Allocates a new instance
    pub fn new(points: Vec<PointId>, dof: Dof, value: f64) -> Self {
        DirichletBc { points, dof, value }
    }
}

/// Holds a constant body force per unit volume (e.g., self weight)
#[derive(Clone, Debug, PartialEq)]
pub struct BodyForce {
    /// The force density vector (len = ndim)
    pub vector: Vec<f64>,
}

impl BodyForce {
    /// Returns the body force `(0, …, −rho·g)` acting along the last axis
    pub fn gravity(ndim: usize, rho: f64, g: f64) -> Self {
        let mut vector = vec![0.0; ndim];
        vector[ndim - 1] = -rho * g;
        BodyForce { vector }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Axis, BodyForce, Boundary, Dof};
    use crate::base::Error;
    use gemlab::mesh::{Block, Mesh};
    use gemlab::shapes::GeoKind;

    fn two_by_one() -> Mesh {
        let mut block = Block::new(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]]).unwrap();
        block.set_ndiv(&[2, 1]).unwrap();
        block.subdivide(GeoKind::Qua4).unwrap()
    }

    #[test]
    fn axis_and_dof_work() {
        assert_eq!(Axis::from_index(2).unwrap(), Axis::Z);
        assert!(matches!(Axis::from_index(3), Err(Error::WrongDimension(4))));
        assert_eq!(Dof::along(Axis::Y), Dof::Uy);
        assert_eq!(Dof::all(2), &[Dof::Ux, Dof::Uy]);
        assert_eq!(Dof::all(3).len(), 3);
        assert_eq!(Dof::Uz.index(), 2);
    }

    #[test]
    fn point_ids_work() {
        // 3------4------5
        // |      |      |
        // 0------1------2
        let mesh = two_by_one();
        let bottom = Boundary::plane_at(Axis::Y, 0.0);
        let ids = bottom.point_ids(&mesh).unwrap();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert_eq!(mesh.points[*id].coords[1], 0.0);
        }
        let right = Boundary::plane_at(Axis::X, 2.0);
        assert_eq!(right.point_ids(&mesh).unwrap().len(), 2);
        let corner = Boundary::point_at(&[2.0, 1.0, 0.0]);
        let ids = corner.point_ids(&mesh).unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(mesh.points[ids[0]].coords, &[2.0, 1.0]);
    }

    #[test]
    fn point_ids_handle_errors() {
        let mesh = two_by_one();
        let back = Boundary::plane_at(Axis::Z, 0.0);
        assert!(matches!(back.point_ids(&mesh), Err(Error::WrongDimension(2))));
        let point = Boundary::point_at(&[1.0]);
        assert!(point.point_ids(&mesh).is_err());
    }

    #[test]
    fn display_works() {
        assert_eq!(format!("{}", Boundary::plane_at(Axis::Y, 0.0)), "Y = 0.0");
        assert_eq!(format!("{}", Boundary::point_at(&[1.0, 2.0])), "point [1.0, 2.0]");
    }

    #[test]
    fn gravity_works() {
        let b = BodyForce::gravity(3, 2000.0, 10.0);
        assert_eq!(b.vector, &[0.0, 0.0, -20000.0]);
    }
}
