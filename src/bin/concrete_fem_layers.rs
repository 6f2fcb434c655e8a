use concrete_fem::prelude::*;
use std::fs;
use structopt::StructOpt;
use uom::si::f64::{MassDensity, Pressure};
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::gigapascal;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "concrete_fem_layers",
    about = "Computes the reaction force of printed layers loaded by their own weight"
)]
struct Options {
    /// JSON file with parameters overriding the defaults, e.g., {"num_layers": "5", "E": "20 GPa"}
    #[structopt(short, long)]
    params: Option<String>,

    /// Writes the solution to this VTU file
    #[structopt(long)]
    vtu: Option<String>,
}

fn main() -> Result<(), Error> {
    env_logger::init();

    // parse options
    let options = Options::from_args();

    // parameters: experiment defaults, fresh concrete, then user-defined values
    let mut params = AmMultipleLayers::default_parameters();
    params
        .set("rho", MassDensity::new::<kilogram_per_cubic_meter>(2070.0))
        .set("E", Pressure::new::<gigapascal>(0.1))
        .set_dimensionless("nu", 0.3);
    if let Some(path) = &options.params {
        let json = fs::read_to_string(path)?;
        params.update(&Parameters::from_json_str(&json)?);
    }

    // solve
    let experiment = AmMultipleLayers::new(&params)?;
    let mut problem = LinearElasticity::new(Box::new(experiment), &params)?;
    let volume = problem.volume()?;
    let name = problem.add_sensor(Box::new(ReactionForceSensor::new(None, None)));
    problem.solve(1.0)?;

    // results
    let reaction = problem.sensors().get(&name)?.get_last_entry()?;
    let thin_line = format!("{:─^1$}", "", 60);
    println!("{}", thin_line);
    print!("{}", problem.parameters());
    println!("{}", thin_line);
    println!("volume = {:?} m³", volume);
    println!("bottom reaction = {:?} N", reaction);
    println!("{}", thin_line);
    if let Some(path) = &options.vtu {
        problem.write_vtu(path)?;
        println!("VTU file written to {}", path);
    }
    Ok(())
}
