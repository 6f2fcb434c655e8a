use super::FunctionSpace;
use crate::base::{BodyForce, Error};
use crate::material::LinearElastic;
use gemlab::integ::{self, IntegPointData};
use gemlab::mesh::{Cell, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::{Matrix, Vector};

/// Implements the local equations of a linear elastic solid element
///
/// The local stiffness matrix is
///
/// ```text
///      ⌠
/// Kₑ = │ Bᵀ ⋅ D ⋅ B  α dΩ
///      ⌡
///      Ωₑ
/// ```
///
/// and the local body force vector is
///
/// ```text
///      ⌠
/// Fₑ = │ Nᵀ b  α dΩ
///      ⌡
///      Ωₑ
/// ```
///
/// where `α` is the thickness (2D only) and `b` is the body force per unit volume.
pub struct ElementSolid {
    /// Local-to-global mapping
    pub local_to_global: Vec<usize>,

    /// Scratchpad to calculate interpolation functions
    pub pad: Scratchpad,

    /// Integration points
    pub ips: IntegPointData,

    /// Local stiffness matrix Kₑ
    pub kke: Matrix,

    /// Local body force vector Fₑ
    pub ffe: Vector,
}

impl ElementSolid {
    /// Allocates a new instance and calculates the local equations
    pub fn new(
        mesh: &Mesh,
        space: &FunctionSpace,
        cell: &Cell,
        model: &LinearElastic,
        body_force: Option<&BodyForce>,
    ) -> Result<Self, Error> {
        let mut pad = Scratchpad::new(space.ndim, cell.kind)?;
        mesh.set_pad(&mut pad, &cell.points);
        let n_local = cell.points.len() * space.ndim;
        let mut element = ElementSolid {
            local_to_global: space.local_to_global(cell),
            pad,
            ips: integ::default_points(cell.kind),
            kke: Matrix::new(n_local, n_local),
            ffe: Vector::new(n_local),
        };
        element.calc_kke(model)?;
        if let Some(body) = body_force {
            element.calc_ffe(body, model.ideal.thickness)?;
        }
        Ok(element)
    }

    /// Calculates the local stiffness matrix
    pub fn calc_kke(&mut self, model: &LinearElastic) -> Result<(), Error> {
        let mut args = integ::CommonArgs::new(&mut self.pad, self.ips);
        if model.ideal.two_dim {
            args.alpha = model.ideal.thickness;
        }
        integ::mat_10_bdb(&mut self.kke, &mut args, |dd, _, _, _| {
            dd.set_tensor(1.0, model.modulus());
            Ok(())
        })?;
        Ok(())
    }

    /// Calculates the local body force vector
    pub fn calc_ffe(&mut self, body_force: &BodyForce, thickness: f64) -> Result<(), Error> {
        let ndim = self.pad.xxt.dims().0;
        if body_force.vector.len() != ndim {
            return Err(Error::Fem("the body force vector must have length equal to ndim"));
        }
        let mut args = integ::CommonArgs::new(&mut self.pad, self.ips);
        if ndim == 2 {
            args.alpha = thickness;
        }
        integ::vec_02_nv(&mut self.ffe, &mut args, |b, _, _| {
            for i in 0..ndim {
                b[i] = body_force.vector[i];
            }
            Ok(())
        })?;
        Ok(())
    }

    /// Returns the volume (area × thickness in 2D) of the element
    pub fn volume(&mut self, thickness: f64) -> Result<f64, Error> {
        let ndim = self.pad.xxt.dims().0;
        let alpha = if ndim == 2 { thickness } else { 1.0 };
        let mut volume = 0.0;
        for iota in self.ips {
            volume += self.pad.calc_jacobian(iota)? * iota[3] * alpha;
        }
        Ok(volume)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementSolid;
    use crate::base::BodyForce;
    use crate::fem::FunctionSpace;
    use crate::material::{Idealization, LinearElastic};
    use gemlab::mesh::{Block, Mesh};
    use gemlab::shapes::GeoKind;
    use russell_lab::{approx_eq, mat_vec_mul, Vector};

    fn one_cell_2d(kind: GeoKind) -> Mesh {
        let mut block = Block::new(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]]).unwrap();
        block.set_ndiv(&[1, 1]).unwrap();
        block.subdivide(kind).unwrap()
    }

    #[test]
    fn rigid_body_motion_gives_no_forces() {
        for kind in [GeoKind::Qua4, GeoKind::Qua9] {
            let mesh = one_cell_2d(kind);
            let space = FunctionSpace::new(&mesh).unwrap();
            let model = LinearElastic::new(&Idealization::new(2), 1000.0, 0.25);
            let e = ElementSolid::new(&mesh, &space, &mesh.cells[0], &model, None).unwrap();
            let n = e.local_to_global.len();
            // translation along x and along y
            for dir in 0..2 {
                let mut u = Vector::new(n);
                for m in 0..n / 2 {
                    u[dir + 2 * m] = 1.0;
                }
                for i in 0..n {
                    let mut f = 0.0;
                    for j in 0..n {
                        f += e.kke.get(i, j) * u[j];
                    }
                    approx_eq(f, 0.0, 1e-10);
                }
            }
            // symmetry
            for i in 0..n {
                for j in 0..n {
                    approx_eq(e.kke.get(i, j), e.kke.get(j, i), 1e-10);
                }
            }
        }
    }

    #[test]
    fn body_force_adds_up_to_weight() {
        let mut ideal = Idealization::new(2);
        ideal.thickness = 0.5;
        let model = LinearElastic::new(&ideal, 1000.0, 0.25);
        let body = BodyForce::gravity(2, 10.0, 2.0);
        for kind in [GeoKind::Qua4, GeoKind::Qua9] {
            let mesh = one_cell_2d(kind);
            let space = FunctionSpace::new(&mesh).unwrap();
            let mut e = ElementSolid::new(&mesh, &space, &mesh.cells[0], &model, Some(&body)).unwrap();
            let volume = e.volume(ideal.thickness).unwrap();
            approx_eq(volume, 1.0, 1e-14);
            let nnode = mesh.cells[0].points.len();
            let (mut fx, mut fy) = (0.0, 0.0);
            for m in 0..nnode {
                fx += e.ffe[2 * m];
                fy += e.ffe[1 + 2 * m];
            }
            approx_eq(fx, 0.0, 1e-14);
            approx_eq(fy, -20.0 * volume, 1e-12);
        }
    }

    #[test]
    fn stiffness_matches_uniaxial_stretch_3d() {
        // a unit cube stretched by δ along x with free lateral contraction
        // requires a total force E δ on the right face
        let mut block = Block::new(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ])
        .unwrap();
        block.set_ndiv(&[1, 1, 1]).unwrap();
        let mesh = block.subdivide(GeoKind::Hex8).unwrap();
        let space = FunctionSpace::new(&mesh).unwrap();
        let (young, poisson, delta) = (1000.0, 0.25, 0.01);
        let model = LinearElastic::new(&Idealization::new(3), young, poisson);
        let e = ElementSolid::new(&mesh, &space, &mesh.cells[0], &model, None).unwrap();
        let cell = &mesh.cells[0];
        let n = e.local_to_global.len();
        let mut u = Vector::new(n);
        for (m, point_id) in cell.points.iter().enumerate() {
            let x = &mesh.points[*point_id].coords;
            u[3 * m] = delta * x[0];
            u[1 + 3 * m] = -poisson * delta * x[1];
            u[2 + 3 * m] = -poisson * delta * x[2];
        }
        let mut fx_right = 0.0;
        for (m, point_id) in cell.points.iter().enumerate() {
            let mut f = 0.0;
            for j in 0..n {
                f += e.kke.get(3 * m, j) * u[j];
            }
            if mesh.points[*point_id].coords[0] == 1.0 {
                fx_right += f;
            }
        }
        approx_eq(fx_right, young * delta, 1e-10);
    }

    #[test]
    fn stiffness_accounts_for_thickness_in_plane_stress() {
        // a 2 × 1 plate with thickness 0.5 stretched by δ along x;
        // the right edge carries E δ × (1 × 0.5)
        let mut ideal = Idealization::new(2);
        ideal.plane_stress = true;
        ideal.thickness = 0.5;
        let (young, poisson, delta) = (1000.0, 0.25, 0.01);
        let model = LinearElastic::new(&ideal, young, poisson);
        for kind in [GeoKind::Qua4, GeoKind::Qua8, GeoKind::Qua9] {
            let mesh = one_cell_2d(kind);
            let space = FunctionSpace::new(&mesh).unwrap();
            let cell = &mesh.cells[0];
            let e = ElementSolid::new(&mesh, &space, cell, &model, None).unwrap();
            let n = e.local_to_global.len();
            let mut u = Vector::new(n);
            for (m, point_id) in cell.points.iter().enumerate() {
                let x = &mesh.points[*point_id].coords;
                u[2 * m] = delta * x[0];
                u[1 + 2 * m] = -poisson * delta * x[1];
            }
            let mut f = Vector::new(n);
            mat_vec_mul(&mut f, 1.0, &e.kke, &u).unwrap();
            let (mut fx_right, mut fy) = (0.0, 0.0);
            for (m, point_id) in cell.points.iter().enumerate() {
                if mesh.points[*point_id].coords[0] == 2.0 {
                    fx_right += f[2 * m];
                }
                fy += f[1 + 2 * m];
            }
            approx_eq(fx_right, young * delta * 0.5, 1e-10);
            approx_eq(fy, 0.0, 1e-10);
        }
    }
}
