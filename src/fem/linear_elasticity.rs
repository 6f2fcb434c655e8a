use super::{calculate_residual, calculate_strain, ElementSolid, FunctionSpace, LinearSystem, PointLocator};
use crate::base::{BodyForce, Error, Parameters};
use crate::experiment::{CantileverBeam, Experiment};
use crate::material::{Idealization, LinearElastic};
use crate::sensor::{Sensor, Sensors};
use gemlab::mesh::Mesh;
use gemlab::shapes::Scratchpad;
use russell_lab::Vector;
use russell_tensor::Tensor2;
use uom::si::acceleration::meter_per_second_squared;
use uom::si::f64::{Acceleration, MassDensity, Pressure};
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;

/// Implements the linear elastic material problem of an experiment
///
/// The parameters are merged in the following order (the last one wins):
///
/// 1. `g = 9.81 m/s²`
/// 2. the parameters of the experiment
/// 3. the given parameters
///
/// The material requires `E` and `nu`; the experiment may require `rho` to compute the
/// self weight. In 2D, `stress_state` selects plane stress or plane strain and `thickness`
/// gives the out-of-plane thickness.
///
/// The element stiffness matrices are computed once. Each call to [LinearElasticity::solve]
/// reads the Dirichlet conditions from the experiment again; thus, displacement loads applied
/// via [LinearElasticity::experiment_mut] take effect in the next solution.
pub struct LinearElasticity {
    experiment: Box<dyn Experiment>,
    parameters: Parameters,
    space: FunctionSpace,
    model: LinearElastic,
    elements: Vec<ElementSolid>,
    body_force: Option<BodyForce>,
    locator: PointLocator,
    displacement: Option<Vector>,
    residual: Option<Vector>,
    sensors: Sensors,
}

impl LinearElasticity {
    /// Allocates a new instance and computes the element equations
    pub fn new(experiment: Box<dyn Experiment>, parameters: &Parameters) -> Result<Self, Error> {
        let mut all = Parameters::new();
        all.set("g", Acceleration::new::<meter_per_second_squared>(9.81));
        all.update(experiment.parameters());
        all.update(parameters);

        let mesh = experiment.mesh();
        let space = FunctionSpace::new(mesh)?;
        let ideal = Idealization::from_parameters(space.ndim, &all)?;
        let model = LinearElastic::from_parameters(&ideal, &all)?;
        let body_force = experiment.create_body_force(&all)?;
        let elements = mesh
            .cells
            .iter()
            .map(|cell| ElementSolid::new(mesh, &space, cell, &model, body_force.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let locator = PointLocator::new(mesh)?;
        log::info!(
            "linear elasticity in {}D with {} elements and {} equations",
            space.ndim,
            elements.len(),
            space.n_equation
        );

        Ok(LinearElasticity {
            experiment,
            parameters: all,
            space,
            model,
            elements,
            body_force,
            locator,
            displacement: None,
            residual: None,
            sensors: Sensors::new(),
        })
    }

    /// Returns a working experiment (cantilever beam) and material parameters (steel)
    ///
    /// * `rho = 7750 kg/m³`
    /// * `E = 210e9 N/m²`
    /// * `nu = 0.28`
    /// * `stress_state = "plane_stress"` (2D only)
    pub fn default_parameters() -> Result<(Box<dyn Experiment>, Parameters), Error> {
        let experiment = CantileverBeam::new(&CantileverBeam::default_parameters())?;
        let mut params = Parameters::new();
        params
            .set("rho", MassDensity::new::<kilogram_per_cubic_meter>(7750.0))
            .set("E", Pressure::new::<pascal>(210e9))
            .set_dimensionless("nu", 0.28)
            .set("stress_state", "plane_stress");
        Ok((Box::new(experiment), params))
    }

    /// Solves the problem and asks all sensors to measure the solution at time `t`
    pub fn solve(&mut self, t: f64) -> Result<(), Error> {
        let bcs = self.experiment.create_displacement_boundary(&self.space)?;
        let mut lin_sys = LinearSystem::new(&self.space, &self.elements, &bcs)?;
        log::debug!(
            "solving at t = {:?} with {} prescribed equations",
            t,
            lin_sys.p_equations.len()
        );
        lin_sys.assemble(&self.elements)?;
        lin_sys.solve()?;
        let residual = calculate_residual(self.space.n_equation, &self.elements, &lin_sys.uu)?;
        self.displacement = Some(lin_sys.uu);
        self.residual = Some(residual);

        // the sensors read the problem while being updated
        let mut sensors = std::mem::take(&mut self.sensors);
        let result = sensors.measure(self, t);
        self.sensors = sensors;
        result
    }

    /// Adds a sensor and returns its name
    ///
    /// A sensor whose name already exists is renamed by appending `2`, `3`, ….
    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) -> String {
        self.sensors.insert(sensor)
    }

    /// Returns the sensors
    pub fn sensors(&self) -> &Sensors {
        &self.sensors
    }

    /// Returns the (mutable) sensors
    pub fn sensors_mut(&mut self) -> &mut Sensors {
        &mut self.sensors
    }

    /// Removes the measurements of all sensors, keeping the sensors
    pub fn clean_sensor_data(&mut self) {
        self.sensors.clear_data();
    }

    /// Removes all sensors
    pub fn delete_sensors(&mut self) {
        self.sensors = Sensors::new();
    }

    /// Returns the experiment
    pub fn experiment(&self) -> &dyn Experiment {
        self.experiment.as_ref()
    }

    /// Returns the (mutable) experiment, e.g., to apply a displacement load
    pub fn experiment_mut(&mut self) -> &mut dyn Experiment {
        self.experiment.as_mut()
    }

    /// Returns the mesh
    pub fn mesh(&self) -> &Mesh {
        self.experiment.mesh()
    }

    /// Returns all (merged) parameters
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the function space
    pub fn function_space(&self) -> &FunctionSpace {
        &self.space
    }

    /// Returns the material model
    pub fn model(&self) -> &LinearElastic {
        &self.model
    }

    /// Returns the body force, if any
    pub fn body_force(&self) -> Option<&BodyForce> {
        self.body_force.as_ref()
    }

    /// Returns the global displacement vector (after solve)
    pub fn displacement(&self) -> Option<&Vector> {
        self.displacement.as_ref()
    }

    /// Returns the global residual vector R = K ⋅ U − F (after solve)
    pub fn residual(&self) -> Option<&Vector> {
        self.residual.as_ref()
    }

    /// Returns the total volume of the domain (area × thickness in 2D)
    pub fn volume(&mut self) -> Result<f64, Error> {
        let thickness = self.model.ideal.thickness;
        let mut volume = 0.0;
        for element in self.elements.iter_mut() {
            volume += element.volume(thickness)?;
        }
        Ok(volume)
    }

    /// Evaluates the displacement vector at a point
    ///
    /// The point is given as `[x, y, z]`; `z` is ignored in 2D.
    pub fn displacement_at(&self, x: &[f64]) -> Result<Vec<f64>, Error> {
        let uu = self.solution()?;
        let (mut pad, cell_id, ksi) = self.prepare(x)?;
        let l2g = &self.elements[cell_id].local_to_global;
        let ndim = self.space.ndim;
        (pad.fn_interp)(&mut pad.interp, &ksi);
        let mut u = vec![0.0; ndim];
        for m in 0..pad.interp.dim() {
            for i in 0..ndim {
                u[i] += pad.interp[m] * uu[l2g[i + m * ndim]];
            }
        }
        Ok(u)
    }

    /// Evaluates the strain tensor at a point, returning the `ndim × ndim` components (row-major)
    pub fn strain_at(&self, x: &[f64]) -> Result<Vec<f64>, Error> {
        let eps = self.strain_tensor_at(x)?;
        Ok(flatten(&eps, self.space.ndim))
    }

    /// Evaluates the stress tensor at a point, returning the `ndim × ndim` components (row-major)
    pub fn stress_at(&self, x: &[f64]) -> Result<Vec<f64>, Error> {
        let eps = self.strain_tensor_at(x)?;
        let mut sig = Tensor2::new(self.model.ideal.mandel());
        self.model.calc_stress(&mut sig, &eps);
        Ok(flatten(&sig, self.space.ndim))
    }

    fn strain_tensor_at(&self, x: &[f64]) -> Result<Tensor2, Error> {
        let uu = self.solution()?;
        let (mut pad, cell_id, ksi) = self.prepare(x)?;
        let mut eps = Tensor2::new(self.model.ideal.mandel());
        calculate_strain(&mut eps, uu, &self.elements[cell_id].local_to_global, &ksi, &mut pad)?;
        Ok(eps)
    }

    fn solution(&self) -> Result<&Vector, Error> {
        self.displacement
            .as_ref()
            .ok_or(Error::Fem("the problem must be solved first"))
    }

    fn prepare(&self, x: &[f64]) -> Result<(Scratchpad, usize, Vec<f64>), Error> {
        let mesh = self.experiment.mesh();
        let (cell_id, ksi) = self.locator.locate(mesh, x)?;
        let cell = &mesh.cells[cell_id];
        let mut pad = Scratchpad::new(mesh.ndim, cell.kind)?;
        mesh.set_pad(&mut pad, &cell.points);
        Ok((pad, cell_id, ksi))
    }
}

/// Returns the ndim × ndim components of a symmetric tensor (row-major)
fn flatten(tt: &Tensor2, ndim: usize) -> Vec<f64> {
    let mut res = Vec::with_capacity(ndim * ndim);
    for i in 0..ndim {
        for j in 0..ndim {
            res.push(tt.get(i, j));
        }
    }
    res
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
