//! slam_bot_bringup CLI

use clap::{Parser, Subcommand};
use slam_bot_bringup::{
    build_launch_plan, config::BringupConfig, evaluate_launch_plan, evaluator::PlanEvaluator,
    package::PackageIndex,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "slam_bot_bringup")]
#[command(about = "Launch plan builder for the slam_bot Gazebo simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bringup configuration (YAML); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Install prefix to search for packages (default: AMENT_PREFIX_PATH)
    #[arg(long = "prefix", global = true)]
    prefixes: Vec<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the unevaluated launch plan as JSON
    Plan,

    /// List the launch arguments the plan declares
    ShowArgs,

    /// Evaluate the plan and write the executor record
    Record {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: record.json)
        #[arg(short, long, default_value = "record.json")]
        output: PathBuf,
    },
}

fn parse_launch_arg(s: &str) -> Result<(String, String), String> {
    match s.split_once(":=") {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("Invalid launch argument format: {}", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => BringupConfig::from_yaml_file(path)?,
        None => BringupConfig::default(),
    };
    let index = if cli.prefixes.is_empty() {
        PackageIndex::from_env()
    } else {
        PackageIndex::new(cli.prefixes)
    };

    let plan = build_launch_plan(&config, &index)?;

    match cli.command {
        Commands::Plan => {
            println!("{}", plan.to_json()?);
        }
        Commands::ShowArgs => {
            let declared = PlanEvaluator::new(&index, HashMap::new()).declared_arguments(&plan)?;
            for arg in declared {
                println!("'{}':", arg.name);
                println!(
                    "    {}",
                    arg.description.as_deref().unwrap_or("no description given")
                );
                if let Some(value) = &arg.default {
                    println!("    (default: '{}')", value);
                }
            }
        }
        Commands::Record { args, output } => {
            let cli_args: HashMap<String, String> = args.into_iter().collect();
            let record = evaluate_launch_plan(&plan, &index, cli_args)?;
            write_record(&record.to_json()?, &output)?;
            log::info!(
                "  {} nodes, {} includes",
                record.node.len(),
                record.include.len()
            );
        }
    }

    Ok(())
}

fn write_record(json: &str, output: &Path) -> std::io::Result<()> {
    std::fs::write(output, json)?;
    log::info!("Generated record.json: {}", output.display());
    Ok(())
}
