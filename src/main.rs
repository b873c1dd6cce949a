//! Evolutionary optimizer CLI - Run a search from JSON configuration.

use std::path::PathBuf;

use evo_optim::{
    compute::evolution::{ConsoleReporter, EvolutionEngine},
    schema::EvolutionConfig,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [trace.json]", args[0]);
        eprintln!();
        eprintln!("Run an evolutionary optimization from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!("  trace.json   Where to write the per-generation trace (optional)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let trace_path = args.get(2).map(PathBuf::from);

    let config = EvolutionConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    println!("Evolutionary Optimization");
    println!("=========================");
    println!("Objective: {}", config.objective.name());
    println!(
        "Genes: {}",
        config.genotype.names().collect::<Vec<_>>().join(", ")
    );
    println!(
        "Population: {} ({} generations)",
        config.population.size, config.generations
    );
    println!();

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let mut reporter = ConsoleReporter;
    if let Err(e) = engine.run_with_reporter(&mut reporter) {
        eprintln!("Evolution failed: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = trace_path {
        match engine.export().save_json(&path) {
            Ok(()) => println!("Trace written to {}", path.display()),
            Err(e) => {
                eprintln!("Error writing trace: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}
