use concrete_fem::prelude::*;
use russell_lab::approx_eq;

fn multiaxial_cube(dim: f64) -> Result<LinearElasticity, Error> {
    let mut params = UniaxialCube::default_parameters();
    params
        .set_dimensionless("dim", dim)
        .set_dimensionless("degree", 1.0)
        .set("strain_state", "multiaxial");
    let cube = UniaxialCube::new(&params)?;
    let mut material = Parameters::new();
    material
        .set("E", Quantity::new(1.0, "kPa")?)
        .set_dimensionless("nu", 0.2)
        .set("stress_state", "plane_stress");
    LinearElasticity::new(Box::new(cube), &material)
}

#[test]
fn test_full_boundary_reaction() -> Result<(), Error> {
    for dim in [2, 3] {
        let mut problem = multiaxial_cube(dim as f64)?;
        let location = if dim == 2 { [0.5, 0.5, 0.0] } else { [0.5, 0.5, 0.5] };
        problem.add_sensor(Box::new(StressSensor::new(&location, None)));
        let experiment = problem.experiment();
        let mut surfaces = vec![
            experiment.boundary_left(),
            experiment.boundary_right(),
            experiment.boundary_top(),
            experiment.boundary_bottom(),
        ];
        if dim == 3 {
            surfaces.push(experiment.boundary_front()?);
            surfaces.push(experiment.boundary_back()?);
        }
        for surface in surfaces {
            problem.add_sensor(Box::new(ReactionForceSensor::new(Some(surface), None)));
        }
        assert_eq!(problem.sensors().len(), 1 + 2 * dim);

        problem.experiment_mut().apply_displ_load(Quantity::new(0.002, "m")?)?;
        problem.solve(1.0)?;

        let sensors = problem.sensors();
        let force_left = sensors.get("ReactionForceSensor")?.get_last_entry()?[0];
        let force_right = sensors.get("ReactionForceSensor2")?.get_last_entry()?[0];
        let force_top = sensors.get("ReactionForceSensor3")?.get_last_entry()?[dim - 1];
        let force_bottom = sensors.get("ReactionForceSensor4")?.get_last_entry()?[dim - 1];

        // opposing forces left-right and top-bottom
        approx_eq(force_left, -force_right, 1e-10);
        approx_eq(force_top, -force_bottom, 1e-10);

        // equal forces on the sides
        approx_eq(force_left, force_bottom, 1e-10);

        // magnitude: σ A with σ = E ε / (1 - ν) in plane stress and E ε / (1 - 2ν) in 3D
        let sigma = if dim == 2 { 1000.0 * 0.002 / 0.8 } else { 1000.0 * 0.002 / 0.6 };
        approx_eq(force_left, sigma, 1e-10);

        if dim == 3 {
            let force_front = sensors.get("ReactionForceSensor5")?.get_last_entry()?[1];
            let force_back = sensors.get("ReactionForceSensor6")?.get_last_entry()?[1];
            approx_eq(force_front, -force_back, 1e-10);
            approx_eq(force_left, force_front, 1e-10);
        }

        // homogeneous stress state
        let stress = sensors.get("StressSensor")?.get_last_entry()?;
        approx_eq(stress[0], sigma, 1e-10);
        if dim == 2 {
            approx_eq(stress[0], stress[3], 1e-10);
        } else {
            approx_eq(stress[0], stress[4], 1e-10);
            approx_eq(stress[0], stress[8], 1e-10);
        }
    }
    Ok(())
}

#[test]
fn test_uniaxial_opposite_reactions() -> Result<(), Error> {
    let mut params = UniaxialCube::default_parameters();
    params.set_dimensionless("dim", 2.0);
    let cube = UniaxialCube::new(&params)?;
    let mut material = Parameters::new();
    material
        .set("E", Quantity::new(1.0, "kPa")?)
        .set_dimensionless("nu", 0.3);
    let mut problem = LinearElasticity::new(Box::new(cube), &material)?;
    let left = problem.experiment().boundary_left();
    let right = problem.experiment().boundary_right();
    problem.add_sensor(Box::new(ReactionForceSensor::new(Some(left), Some("left"))));
    problem.add_sensor(Box::new(ReactionForceSensor::new(Some(right), Some("right"))));
    problem.experiment_mut().apply_displ_load(Quantity::new(-1.0, "mm")?)?;
    problem.solve(1.0)?;

    let left = problem.sensors().get("left")?.get_last_entry()?;
    let right = problem.sensors().get("right")?.get_last_entry()?;
    approx_eq(left[0], -right[0], 1e-10);

    // compression (plane strain): σxx = E ε / (1 - ν²)
    approx_eq(right[0], 1000.0 * 0.001 / (1.0 - 0.09), 1e-10);
    Ok(())
}

#[test]
fn test_default_surface_is_the_bottom() -> Result<(), Error> {
    let mut params = AmMultipleLayers::default_parameters();
    params
        .set_dimensionless("num_layers", 3.0)
        .set_dimensionless("num_elements_layer_length", 4.0);
    let experiment = AmMultipleLayers::new(&params)?;
    let bottom = experiment.boundary_bottom();
    let top = experiment.boundary_top();
    let mut material = Parameters::new();
    material
        .set("rho", Quantity::new(2070.0, "kg/m^3")?)
        .set("E", Quantity::new(0.1, "GPa")?)
        .set_dimensionless("nu", 0.3);
    let mut problem = LinearElasticity::new(Box::new(experiment), &material)?;
    problem.add_sensor(Box::new(ReactionForceSensor::new(None, None)));
    problem.add_sensor(Box::new(ReactionForceSensor::new(Some(bottom), None)));
    problem.add_sensor(Box::new(ReactionForceSensor::new(Some(top), Some("top_sensor"))));
    problem.solve(1.0)?;

    let default = problem.sensors().get("ReactionForceSensor")?.get_last_entry()?;
    let bottom = problem.sensors().get("ReactionForceSensor2")?.get_last_entry()?;
    let top = problem.sensors().get("top_sensor")?.get_last_entry()?;
    assert_eq!(default, bottom);

    // the top is free
    approx_eq(top[0], 0.0, 1e-8);
    approx_eq(top[1], 0.0, 1e-8);
    Ok(())
}
