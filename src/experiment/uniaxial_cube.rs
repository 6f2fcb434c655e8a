use super::{box_mesh, default_experiment_parameters, read_dim, Experiment};
use crate::base::{Axis, Boundary, Dimension, DirichletBc, Dof, Error, Parameters, Quantity};
use crate::fem::FunctionSpace;
use gemlab::mesh::Mesh;
use uom::si::f64::Length;
use uom::si::length::meter;

/// Defines how the cube is loaded
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StrainState {
    /// The displacement is applied on the right face only
    Uniaxial,

    /// The same normal displacement is applied on the right, top (and back) faces
    Multiaxial,
}

impl StrainState {
    /// Parses the `strain_state` parameter
    pub fn from_text(text: &str) -> Result<Self, Error> {
        match text.to_lowercase().as_str() {
            "uniaxial" => Ok(StrainState::Uniaxial),
            "multiaxial" => Ok(StrainState::Multiaxial),
            _ => Err(Error::invalid("strain_state", "must be uniaxial or multiaxial")),
        }
    }
}

/// Implements a box loaded by prescribed displacements
///
/// The left (x = 0), bottom and front (y = 0, 3D only) faces are supported by rollers;
/// i.e., only the normal displacement is fixed. The displacement load set by
/// [Experiment::apply_displ_load] is applied normal to the right face, or, for the
/// multiaxial strain state, normal to all faces opposite to the rollers.
pub struct UniaxialCube {
    parameters: Parameters,
    mesh: Mesh,
    strain_state: StrainState,
    displacement: f64,
}

impl UniaxialCube {
    /// Allocates a new instance and generates the mesh
    pub fn new(parameters: &Parameters) -> Result<Self, Error> {
        let mut all = default_experiment_parameters();
        all.update(parameters);
        let dim = read_dim(&all)?;
        let strain_state = StrainState::from_text(all.text("strain_state")?)?;
        let degree = all.count("degree")?;
        let length = all.magnitude_of("length", Dimension::LENGTH)?;
        let height = all.magnitude_of("height", Dimension::LENGTH)?;
        let nx = all.count("num_elements_length")?;
        let nh = all.count("num_elements_height")?;
        log::debug!("setup {}D cube with {:?} strain state", dim, strain_state);
        let mesh = if dim == 2 {
            box_mesh(&[length, height], &[nx, nh], degree)?
        } else {
            let width = all.magnitude_of("width", Dimension::LENGTH)?;
            let nw = all.count("num_elements_width")?;
            box_mesh(&[length, width, height], &[nx, nw, nh], degree)?
        };
        Ok(UniaxialCube {
            parameters: all,
            mesh,
            strain_state,
            displacement: 0.0,
        })
    }

    /// Returns a set of working parameters
    pub fn default_parameters() -> Parameters {
        let mut params = Parameters::new();
        params
            .set_dimensionless("dim", 3.0)
            .set("length", Length::new::<meter>(1.0))
            .set("height", Length::new::<meter>(1.0))
            .set("width", Length::new::<meter>(1.0)) // 3D only
            .set_dimensionless("num_elements_length", 2.0)
            .set_dimensionless("num_elements_height", 2.0)
            .set_dimensionless("num_elements_width", 2.0) // 3D only
            .set("strain_state", "uniaxial");
        params
    }

    /// Returns the strain state
    pub fn strain_state(&self) -> StrainState {
        self.strain_state
    }

    /// Returns the current displacement load (m)
    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// Returns the roller supports as (boundary, normal DOF)
    fn rollers(&self) -> Result<Vec<(Boundary, Dof)>, Error> {
        let mut rollers = vec![
            (self.boundary_left(), Dof::Ux),
            (self.boundary_bottom(), Dof::along(self.vertical())),
        ];
        if self.ndim() == 3 {
            rollers.push((self.boundary_front()?, Dof::Uy));
        }
        Ok(rollers)
    }

    /// Returns the loaded faces as (boundary, normal DOF)
    fn loaded_faces(&self) -> Result<Vec<(Boundary, Dof)>, Error> {
        let mut faces = vec![(self.boundary_right(), Dof::Ux)];
        if self.strain_state == StrainState::Multiaxial {
            faces.push((self.boundary_top(), Dof::along(self.vertical())));
            if self.ndim() == 3 {
                faces.push((self.boundary_back()?, Dof::Uy));
            }
        }
        Ok(faces)
    }

    fn vertical(&self) -> Axis {
        super::vertical_axis(self.ndim())
    }
}

impl Experiment for UniaxialCube {
    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn create_displacement_boundary(&self, space: &FunctionSpace) -> Result<Vec<DirichletBc>, Error> {
        if space.ndim != self.ndim() {
            return Err(Error::WrongDimension(space.ndim));
        }
        let mut bcs = Vec::new();
        for (boundary, dof) in self.rollers()? {
            bcs.push(DirichletBc::new(boundary.point_ids(&self.mesh)?, dof, 0.0));
        }
        for (boundary, dof) in self.loaded_faces()? {
            bcs.push(DirichletBc::new(boundary.point_ids(&self.mesh)?, dof, self.displacement));
        }
        Ok(bcs)
    }

    fn apply_displ_load(&mut self, displacement: Quantity) -> Result<(), Error> {
        if displacement.dimension() != Dimension::LENGTH {
            return Err(Error::invalid("displacement load", "must be a length"));
        }
        self.displacement = displacement.magnitude();
        log::debug!("applied displacement load of {}", displacement);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{StrainState, UniaxialCube};
    use crate::base::{Axis, Boundary, Dof, Error, Quantity};
    use crate::experiment::Experiment;
    use crate::fem::FunctionSpace;
    use russell_lab::approx_eq;

    #[test]
    fn strain_state_works() {
        assert_eq!(StrainState::from_text("Multiaxial").unwrap(), StrainState::Multiaxial);
        assert!(StrainState::from_text("biaxial").is_err());
    }

    #[test]
    fn boundaries_work() {
        let exp = UniaxialCube::new(&UniaxialCube::default_parameters()).unwrap();
        assert_eq!(exp.boundary_bottom(), Boundary::plane_at(Axis::Z, 0.0));
        assert_eq!(exp.boundary_top(), Boundary::plane_at(Axis::Z, 1.0));
        assert_eq!(exp.boundary_right(), Boundary::plane_at(Axis::X, 1.0));
        assert_eq!(exp.boundary_back().unwrap(), Boundary::plane_at(Axis::Y, 1.0));

        let mut params = UniaxialCube::default_parameters();
        params.set_dimensionless("dim", 2.0);
        let exp = UniaxialCube::new(&params).unwrap();
        assert_eq!(exp.boundary_bottom(), Boundary::plane_at(Axis::Y, 0.0));
        assert!(matches!(exp.boundary_front(), Err(Error::WrongDimension(2))));
    }

    #[test]
    fn displacement_boundary_works() {
        let mut params = UniaxialCube::default_parameters();
        params.set_dimensionless("dim", 2.0).set("strain_state", "multiaxial");
        let mut exp = UniaxialCube::new(&params).unwrap();
        assert!(exp.apply_displ_load(Quantity::new(1.0, "N").unwrap()).is_err());
        exp.apply_displ_load(Quantity::new(2.0, "mm").unwrap()).unwrap();
        let space = FunctionSpace::new(exp.mesh()).unwrap();
        let bcs = exp.create_displacement_boundary(&space).unwrap();
        assert_eq!(bcs.len(), 4);
        let dofs: Vec<_> = bcs.iter().map(|bc| bc.dof).collect();
        assert_eq!(dofs, &[Dof::Ux, Dof::Uy, Dof::Ux, Dof::Uy]);
        assert_eq!(bcs[0].value, 0.0);
        approx_eq(bcs[2].value, 0.002, 1e-15);
        assert_eq!(bcs[3].points.len(), 5); // Qua9 with 2 divisions
    }

    #[test]
    fn uniaxial_loads_the_right_face_only() {
        let mut exp = UniaxialCube::new(&UniaxialCube::default_parameters()).unwrap();
        exp.apply_displ_load(Quantity::new(-1.0, "cm").unwrap()).unwrap();
        let space = FunctionSpace::new(exp.mesh()).unwrap();
        let bcs = exp.create_displacement_boundary(&space).unwrap();
        assert_eq!(bcs.len(), 4);
        let loaded: Vec<_> = bcs.iter().filter(|bc| bc.value != 0.0).collect();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].dof, Dof::Ux);
        for id in &loaded[0].points {
            assert_eq!(exp.mesh().points[*id].coords[0], 1.0);
        }
    }
}
