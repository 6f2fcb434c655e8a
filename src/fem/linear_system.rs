use super::{ElementSolid, FunctionSpace};
use crate::base::{DirichletBc, Error};
use russell_lab::{mat_vec_mul, Vector};
use russell_sparse::{CooMatrix, Genie, LinSolver, Sym};

/// Holds variables to solve the global linear system
///
/// The prescribed equations are eliminated by putting ones on the diagonal of the
/// global matrix and moving the known terms to the right-hand side.
pub struct LinearSystem {
    /// Total number of global equations (total number of DOFs)
    pub n_equation: usize,

    /// Is an array indicating which DOFs (equations) are prescribed
    ///
    /// The length of `prescribed` is equal to `n_equation`, the total number of DOFs (total number of equations).
    pub prescribed: Vec<bool>,

    /// Is an array with only the DOFs numbers of the prescribed equations
    pub p_equations: Vec<usize>,

    /// Holds the supremum of the number of nonzero values (nnz) in the global matrix
    ///
    /// `nnz_sup = n_prescribed + Σ (ndof_local × ndof_local)`
    pub nnz_sup: usize,

    /// Holds the right-hand side vector
    pub rhs: Vector,

    /// Holds the global stiffness matrix K (with the prescribed equations replaced)
    pub kk: CooMatrix,

    /// Holds the solution U (and the prescribed values)
    pub uu: Vector,
}

impl LinearSystem {
    /// Allocates a new instance
    pub fn new(space: &FunctionSpace, elements: &[ElementSolid], bcs: &[DirichletBc]) -> Result<Self, Error> {
        let n_equation = space.n_equation;
        let mut prescribed = vec![false; n_equation];
        let mut uu = Vector::new(n_equation);
        for bc in bcs {
            for point_id in &bc.points {
                let eq = space.eq(*point_id, bc.dof)?;
                prescribed[eq] = true;
                uu[eq] = bc.value;
            }
        }
        let p_equations: Vec<_> = (0..n_equation).filter(|eq| prescribed[*eq]).collect();
        let nnz_sup = p_equations.len()
            + elements.iter().fold(0, |acc, e| {
                let n = e.local_to_global.len();
                acc + n * n
            });
        Ok(LinearSystem {
            n_equation,
            prescribed,
            p_equations,
            nnz_sup,
            rhs: Vector::new(n_equation),
            kk: CooMatrix::new(n_equation, n_equation, nnz_sup, Sym::No)?,
            uu,
        })
    }

    /// Assembles the global matrix and the right-hand side
    pub fn assemble(&mut self, elements: &[ElementSolid]) -> Result<(), Error> {
        self.rhs.fill(0.0);
        for e in elements {
            let l2g = &e.local_to_global;
            for (i, ii) in l2g.iter().enumerate() {
                if self.prescribed[*ii] {
                    continue;
                }
                self.rhs[*ii] += e.ffe[i];
                for (j, jj) in l2g.iter().enumerate() {
                    if self.prescribed[*jj] {
                        self.rhs[*ii] -= e.kke.get(i, j) * self.uu[*jj];
                    } else {
                        self.kk.put(*ii, *jj, e.kke.get(i, j))?;
                    }
                }
            }
        }
        for eq in &self.p_equations {
            self.kk.put(*eq, *eq, 1.0)?;
            self.rhs[*eq] = self.uu[*eq];
        }
        Ok(())
    }

    /// Solves the linear system, saving the results in `uu`
    pub fn solve(&mut self) -> Result<(), Error> {
        LinSolver::compute(Genie::Umfpack, &mut self.uu, &self.kk, &self.rhs, None)?;
        Ok(())
    }
}

/// Calculates the residual vector R = K ⋅ U − F using the element equations
pub fn calculate_residual(n_equation: usize, elements: &[ElementSolid], uu: &Vector) -> Result<Vector, Error> {
    let mut rr = Vector::new(n_equation);
    for e in elements {
        let l2g = &e.local_to_global;
        let n_local = l2g.len();
        let mut ue = Vector::new(n_local);
        let mut re = Vector::new(n_local);
        for (i, ii) in l2g.iter().enumerate() {
            ue[i] = uu[*ii];
        }
        mat_vec_mul(&mut re, 1.0, &e.kke, &ue)?; // Rₑ = Kₑ ⋅ Uₑ
        for (i, ii) in l2g.iter().enumerate() {
            rr[*ii] += re[i] - e.ffe[i];
        }
    }
    Ok(rr)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
