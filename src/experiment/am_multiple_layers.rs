use super::{box_mesh, default_experiment_parameters, read_dim, vertical_axis, Experiment};
use crate::base::{BodyForce, Dimension, DirichletBc, Error, Parameters};
use crate::fem::FunctionSpace;
use gemlab::mesh::Mesh;
use uom::si::f64::Length;
use uom::si::length::meter;

/// Implements a layered structure as printed by additive manufacturing
///
/// All layers have the same height and are stacked on top of each other; the bottom
/// is fixed. The mesh includes all layers at once; layers may be activated by the
/// caller, e.g., via a pseudo-density, using [AmMultipleLayers::layer_of_cell].
///
/// ```text
/// 2D:                                  3D: adds the width along y
///        layer_length
///  ┌────────────────────┐  ┐
///  │      layer n-1     │  │
///  ├────────────────────┤  │ num_layers × layer_height
///  │         ⋮          │  │
///  ├────────────────────┤  │
///  │      layer 0       │  │
///  └────────────────────┘  ┘
///  ▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲ fixed
/// ```
pub struct AmMultipleLayers {
    parameters: Parameters,
    mesh: Mesh,
}

impl AmMultipleLayers {
    /// Allocates a new instance and generates the mesh
    ///
    /// The given parameters override the defaults (`degree = 2`).
    pub fn new(parameters: &Parameters) -> Result<Self, Error> {
        let mut all = default_experiment_parameters();
        all.update(parameters);
        let dim = read_dim(&all)?;
        let num_layers = all.count("num_layers")?;
        let layer_length = all.magnitude_of("layer_length", Dimension::LENGTH)?;
        let layer_height = all.magnitude_of("layer_height", Dimension::LENGTH)?;
        let nx = all.count("num_elements_layer_length")?;
        let nh = all.count("num_elements_layer_height")?;
        let degree = all.count("degree")?;
        log::debug!("setup mesh for {}D with {} layers", dim, num_layers);
        let height = num_layers as f64 * layer_height;
        let mesh = if dim == 2 {
            box_mesh(&[layer_length, height], &[nx, num_layers * nh], degree)?
        } else {
            let layer_width = all.magnitude_of("layer_width", Dimension::LENGTH)?;
            let nw = all.count("num_elements_layer_width")?;
            box_mesh(&[layer_length, layer_width, height], &[nx, nw, num_layers * nh], degree)?
        };
        Ok(AmMultipleLayers { parameters: all, mesh })
    }

    /// Returns a set of working parameters
    pub fn default_parameters() -> Parameters {
        let mut params = Parameters::new();
        params
            .set_dimensionless("dim", 2.0)
            .set_dimensionless("num_layers", 10.0)
            .set("layer_length", Length::new::<meter>(0.5))
            .set("layer_height", Length::new::<meter>(0.01))
            .set("layer_width", Length::new::<meter>(0.05)) // 3D only
            .set_dimensionless("num_elements_layer_length", 10.0)
            .set_dimensionless("num_elements_layer_height", 1.0)
            .set_dimensionless("num_elements_layer_width", 2.0); // 3D only
        params
    }

    /// Returns the layer index of each cell, computed from the height of the cell centroid
    pub fn layer_of_cell(&self) -> Result<Vec<usize>, Error> {
        let num_layers = self.parameters.count("num_layers")?;
        let layer_height = self.parameters.magnitude_of("layer_height", Dimension::LENGTH)?;
        let axis = vertical_axis(self.mesh.ndim).index();
        let layers = self
            .mesh
            .cells
            .iter()
            .map(|cell| {
                let sum: f64 = cell.points.iter().map(|p| self.mesh.points[*p].coords[axis]).sum();
                let centroid = sum / cell.points.len() as f64;
                usize::min((centroid / layer_height) as usize, num_layers - 1)
            })
            .collect();
        Ok(layers)
    }
}

impl Experiment for AmMultipleLayers {
    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Fixes all displacement components at the bottom
    fn create_displacement_boundary(&self, space: &FunctionSpace) -> Result<Vec<DirichletBc>, Error> {
        let bottom = self.boundary_bottom().point_ids(&self.mesh)?;
        Ok(space
            .dofs()
            .iter()
            .map(|dof| DirichletBc::new(bottom.clone(), *dof, 0.0))
            .collect())
    }

    /// Returns the self weight `(0, …, −rho·g)`
    fn create_body_force(&self, params: &Parameters) -> Result<Option<BodyForce>, Error> {
        let rho = params.magnitude_of("rho", Dimension::DENSITY)?;
        let g = params.magnitude_of("g", Dimension::ACCELERATION)?;
        Ok(Some(BodyForce::gravity(self.mesh.ndim, rho, g)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
