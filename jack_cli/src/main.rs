//! # Scissor Jack CLI
//!
//! Command line front end for `jack_core`: evaluate a design, optimize one,
//! or print the material and failure load tables.
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for solver details.

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};

use jack_core::calculations::{capacity, safety_factors, CapacityInput};
use jack_core::config::{JackConfig, SafetyTargets};
use jack_core::design::DesignVector;
use jack_core::errors::{CalcError, CalcResult};
use jack_core::file_io::{load_config, save_config, save_study};
use jack_core::materials::JackMaterial;
use jack_core::study::Study;

const LOG_ENV: &str = env_logger::DEFAULT_FILTER_ENV;

#[derive(Parser, Debug)]
#[command(name = "jack_cli")]
#[command(version)]
#[command(about = "Scissor jack safety factors and cost optimization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the safety factors, weight and cost of one design
    Evaluate {
        /// Design vector: l_d,h,w,t,d_cb,e (inches)
        #[arg(long, value_delimiter = ',', required = true)]
        design: Vec<f64>,
        /// JSON configuration file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Diagonal material, e.g. "AL 3004 h38"
        #[arg(short, long)]
        material: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the cheapest design meeting every safety target
    Optimize {
        /// JSON configuration file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Diagonal material, e.g. "steel"
        #[arg(short, long)]
        material: Option<String>,
        /// Use the conservative safety targets
        #[arg(long)]
        strict: bool,
        /// Save the configuration and result as a study file
        #[arg(long)]
        save: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the material property table
    Materials,
    /// Print the failure load table for the prototype geometry
    Capacity {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let env = Env::new().filter_or(LOG_ENV, "info");
    Builder::from_env(env).format_timestamp(None).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CalcResult<()> {
    match command {
        Commands::Evaluate { design, config, material, json } => {
            let config = build_config(config.as_deref(), material.as_deref(), false)?;
            let design = DesignVector::from_slice(&design)?;
            let result = safety_factors(&design, &config)?;
            if json {
                print_json(&result)?;
            } else {
                println!("Design:");
                print!("{}", report::design_report(&design));
                println!();
                print!("{}", report::safety_report(&result, &config));
            }
        }
        Commands::Optimize { config, material, strict, save, json } => {
            let config = build_config(config.as_deref(), material.as_deref(), strict)?;
            let mut study = Study::new(format!("{} jack", config.materials.diagonal), config);
            let result = study.solve()?.clone();
            if json {
                print_json(&result)?;
            } else {
                print!("{}", report::optimization_report(&result, &study.config));
            }
            if let Some(path) = save {
                save_study(&study, &path)?;
                log::info!("saved study to {}", path.display());
            }
        }
        Commands::Materials => print!("{}", report::materials_table()),
        Commands::Capacity { json } => {
            let result = capacity::calculate(&CapacityInput::default())?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", report::capacity_table(&result));
            }
        }
        Commands::InitConfig { path } => {
            save_config(&JackConfig::default(), &path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

fn build_config(path: Option<&Path>, material: Option<&str>, strict: bool) -> CalcResult<JackConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => JackConfig::default(),
    };
    if let Some(name) = material {
        config.materials.diagonal = JackMaterial::from_name(name)?;
    }
    if strict {
        config.targets = SafetyTargets::strict();
    }
    config.validate()?;
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}
