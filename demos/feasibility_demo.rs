//! Decides a handful of generated instances and prints the diagnostics.
//!
//! Run with `RUST_LOG=partdist=debug` to see per-iteration events.

use partdist::config::SolverConfig;
use partdist::driver::FeasibilityDriver;
use partdist::instance::{GenerationMode, InstanceSpec, TspInstance};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Optional TOML configuration as first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match SolverConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Cannot load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => SolverConfig::default(),
    };
    let driver = match FeasibilityDriver::new(config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut instances: Vec<(String, TspInstance)> = vec![(
        "unit triangle, K = 3".to_string(),
        TspInstance::new(
            vec![
                vec![0.0, 1.0, 1.0],
                vec![1.0, 0.0, 1.0],
                vec![1.0, 1.0, 0.0],
            ],
            3.0,
        )
        .expect("valid instance"),
    )];
    for (seed, mode) in [(1, GenerationMode::Random), (2, GenerationMode::Euclidean)] {
        let spec = InstanceSpec::new(5, 250.0)
            .with_distance_range(10, 100)
            .with_seed(seed)
            .with_mode(mode);
        let instance = spec.generate().expect("valid generation parameters");
        instances.push((format!("{mode:?} 5 cities, seed {seed}, K = 250"), instance));
    }

    println!("Partial-Distance Feasibility Results:");
    println!("=====================================");
    for (label, instance) in &instances {
        match driver.run(instance) {
            Ok(report) => println!(
                "{label}: {} ({} points, {} constraints, {} iterations, {}, {:.1} ms)",
                report.decision,
                report.point_count,
                report.constraint_count,
                report.outcome.iterations(),
                report.termination(),
                report.elapsed.as_secs_f64() * 1000.0,
            ),
            Err(e) => println!("{label}: rejected ({e})"),
        }
    }
}
