// Euler, improved Euler and Runge-Kutta 4 on the default configuration

use simplelog::{Config, LevelFilter, SimpleLogger};
use singular_ode::*;

use std::{fs, fs::File, io::BufWriter, io::Write, path::Path};

fn main() {
    if let Err(e) = SimpleLogger::init(LevelFilter::Info, Config::default()) {
        println!("Could not initialize the logger. Error: {:?}", e);
    }

    let problem = match Problem::new(-5.0, 0.0, 100, 2.0) {
        Ok(problem) => problem,
        Err(e) => {
            println!("An error occurred: {}", e);
            return;
        }
    };
    println!("{}", problem);
    println!("Singularity at x = {}", problem.singularity());

    if let Err(e) = fs::create_dir_all("./outputs") {
        println!("Could not create the output directory. Error: {:?}", e);
        return;
    }

    for method in Method::ALL {
        match run(&problem, method) {
            Ok(()) => {}
            Err(e) => println!("An error occurred: {}", e),
        }
    }
}

fn run(problem: &Problem, method: Method) -> Result<(), IntegrationError> {
    let solution = solve(problem, method)?;
    let local = solution.local_error(problem)?;
    let global = global_error(problem, method)?;

    println!("\n{}", method);
    println!("{}", solution.stats);
    println!("Average approximation error: {:.3}", local.mean());
    println!("Maximum local error: {:.3}", local.max());

    let name = format!("{:?}", method).to_lowercase();
    let path = format!("./outputs/{}_trajectory.dat", name);
    save(
        solution.grid.iter().copied(),
        solution.trajectory.iter().copied(),
        Path::new(&path),
    );
    let path = format!("./outputs/{}_local_error.dat", name);
    save(
        local.indices().iter().map(|&i| i as f64),
        local.errors().iter().copied(),
        Path::new(&path),
    );
    let path = format!("./outputs/{}_global_error.dat", name);
    save(
        global.resolutions.iter().map(|&n| n as f64),
        global.max_errors.iter().copied(),
        Path::new(&path),
    );
    println!("Results saved in: ./outputs/{}_*.dat", name);
    Ok(())
}

pub fn save(xs: impl Iterator<Item = f64>, ys: impl Iterator<Item = f64>, filename: &Path) {
    // Create or open file
    let file = match File::create(filename) {
        Err(e) => {
            println!("Could not open file. Error: {:?}", e);
            return;
        }
        Ok(buf) => buf,
    };
    let mut buf = BufWriter::new(file);

    // Write one x, y pair per line in a csv format
    for (x, y) in xs.zip(ys) {
        if let Err(e) = writeln!(buf, "{}, {}", x, y) {
            println!("Could not write to file. Error: {:?}", e);
            return;
        }
    }
    if let Err(e) = buf.flush() {
        println!("Could not write to file. Error: {:?}", e);
    }
}
