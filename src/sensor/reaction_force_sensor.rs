use super::{Sensor, SensorData};
use crate::base::{Boundary, Dimension, Error};
use crate::fem::LinearElasticity;

/// Measures the reaction force on a surface, one component per direction
///
/// The reaction is the negative sum of the residual R = K ⋅ U − F over the DOFs of the
/// points on the surface; i.e., the integral of the traction over the surface. Each
/// direction is summed independently.
///
/// Without a surface, the bottom boundary of the experiment is used.
pub struct ReactionForceSensor {
    data: SensorData,
    surface: Option<Boundary>,
}

impl ReactionForceSensor {
    /// Allocates a new instance
    ///
    /// The default name is `ReactionForceSensor`.
    pub fn new(surface: Option<Boundary>, name: Option<&str>) -> Self {
        ReactionForceSensor {
            data: SensorData::new(name.unwrap_or("ReactionForceSensor"), Dimension::FORCE),
            surface,
        }
    }

    /// Returns the measured surface (None means the bottom of the experiment)
    pub fn surface(&self) -> Option<&Boundary> {
        self.surface.as_ref()
    }
}

impl Sensor for ReactionForceSensor {
    fn data(&self) -> &SensorData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut SensorData {
        &mut self.data
    }

    fn measure(&mut self, problem: &LinearElasticity, t: f64) -> Result<(), Error> {
        let rr = problem
            .residual()
            .ok_or(Error::Fem("the problem must be solved before measuring the reaction force"))?;
        let surface = match &self.surface {
            Some(boundary) => boundary.clone(),
            None => problem.experiment().boundary_bottom(),
        };
        let space = problem.function_space();
        let points = surface.point_ids(problem.mesh())?;
        let mut reaction = vec![0.0; space.ndim];
        for dof in space.dofs() {
            for point_id in &points {
                reaction[dof.index()] -= rr[space.eq(*point_id, *dof)?];
            }
        }
        self.data.push(t, reaction);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
