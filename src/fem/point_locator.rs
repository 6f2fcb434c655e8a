use crate::base::Error;
use gemlab::mesh::{CellId, Mesh};
use gemlab::shapes::{GeoKind, Scratchpad};

/// Tolerance used when comparing coordinates
const TOLERANCE: f64 = 1e-10;

/// Finds the cell containing a point and the reference coordinates of the point
///
/// The cells must be axis-aligned quadrilaterals or hexahedra, as generated by
/// the experiment setups; thus, the reference coordinates are obtained directly
/// from the bounding box of each cell.
pub struct PointLocator {
    /// Holds the (min, max) coordinates of each cell
    boxes: Vec<(Vec<f64>, Vec<f64>)>,
}

impl PointLocator {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh) -> Result<Self, Error> {
        let ndim = mesh.ndim;
        let mut boxes = Vec::with_capacity(mesh.cells.len());
        for cell in &mesh.cells {
            match cell.kind {
                GeoKind::Qua4 | GeoKind::Qua8 | GeoKind::Qua9 | GeoKind::Hex8 | GeoKind::Hex20 => (),
                _ => return Err(Error::Fem("cell kind is not available for locating points")),
            }
            let mut xmin = vec![f64::MAX; ndim];
            let mut xmax = vec![f64::MIN; ndim];
            for point_id in &cell.points {
                let x = &mesh.points[*point_id].coords;
                for i in 0..ndim {
                    xmin[i] = f64::min(xmin[i], x[i]);
                    xmax[i] = f64::max(xmax[i], x[i]);
                }
            }
            boxes.push((xmin, xmax));
        }
        Ok(PointLocator { boxes })
    }

    /// Returns the id of the first cell containing `x` and the reference coordinates ξ
    ///
    /// Only the first `ndim` components of `x` are considered; e.g., `[x, y, 0.0]` may be
    /// given for a 2D mesh.
    pub fn locate(&self, mesh: &Mesh, x: &[f64]) -> Result<(CellId, Vec<f64>), Error> {
        let ndim = mesh.ndim;
        if x.len() < ndim {
            return Err(Error::WrongDimension(x.len()));
        }
        for (cell_id, (xmin, xmax)) in self.boxes.iter().enumerate() {
            let inside = (0..ndim).all(|i| x[i] >= xmin[i] - TOLERANCE && x[i] <= xmax[i] + TOLERANCE);
            if inside {
                let ksi = (0..ndim)
                    .map(|i| {
                        let k = 2.0 * (x[i] - xmin[i]) / (xmax[i] - xmin[i]) - 1.0;
                        f64::max(-1.0, f64::min(1.0, k))
                    })
                    .collect::<Vec<_>>();
                let cell = &mesh.cells[cell_id];
                let mut pad = Scratchpad::new(ndim, cell.kind)?;
                mesh.set_pad(&mut pad, &cell.points);
                let xx = real_coords(&mut pad, &ksi);
                let scale = (0..ndim).fold(1.0, |acc, i| f64::max(acc, xmax[i] - xmin[i]));
                if (0..ndim).any(|i| f64::abs(xx[i] - x[i]) > TOLERANCE * scale * 1e3) {
                    return Err(Error::Fem("cell is not aligned with the reference coordinates"));
                }
                return Ok((cell_id, ksi));
            }
        }
        Err(Error::PointOutsideMesh(x[..ndim].to_vec()))
    }
}

/// Calculates the real coordinates x(ξ) using the interpolation functions
pub(crate) fn real_coords(pad: &mut Scratchpad, ksi: &[f64]) -> Vec<f64> {
    let (ndim, nnode) = pad.xxt.dims();
    (pad.fn_interp)(&mut pad.interp, ksi);
    let mut x = vec![0.0; ndim];
    for m in 0..nnode {
        for i in 0..ndim {
            x[i] += pad.interp[m] * pad.xxt.get(i, m);
        }
    }
    x
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{real_coords, PointLocator};
    use crate::base::Error;
    use gemlab::mesh::Block;
    use gemlab::shapes::{GeoKind, Scratchpad};
    use russell_lab::approx_eq;

    #[test]
    fn locate_works() {
        let mut block = Block::new(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]]).unwrap();
        block.set_ndiv(&[4, 2]).unwrap();
        let mesh = block.subdivide(GeoKind::Qua9).unwrap();
        let locator = PointLocator::new(&mesh).unwrap();
        for x in [[0.0, 0.0, 0.0], [1.3, 0.7, 0.0], [2.0, 1.0, 0.0], [0.5, 0.5, 0.0]] {
            let (cell_id, ksi) = locator.locate(&mesh, &x).unwrap();
            let cell = &mesh.cells[cell_id];
            let mut pad = Scratchpad::new(2, cell.kind).unwrap();
            mesh.set_pad(&mut pad, &cell.points);
            let xx = real_coords(&mut pad, &ksi);
            approx_eq(xx[0], x[0], 1e-13);
            approx_eq(xx[1], x[1], 1e-13);
        }
    }

    #[test]
    fn locate_handles_errors() {
        let mut block = Block::new(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]]).unwrap();
        block.set_ndiv(&[2, 1]).unwrap();
        let mesh = block.subdivide(GeoKind::Qua4).unwrap();
        let locator = PointLocator::new(&mesh).unwrap();
        assert!(matches!(locator.locate(&mesh, &[3.0, 0.0]), Err(Error::PointOutsideMesh(_))));
        assert!(matches!(locator.locate(&mesh, &[1.0]), Err(Error::WrongDimension(1))));
        assert_eq!(
            locator.locate(&mesh, &[3.0, 0.5, 0.0]).err().unwrap().to_string(),
            "cannot find a cell containing the point [3.0, 0.5]"
        );
    }
}
