mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "solver-compare", about = "Summarize stacking-problem solver experiments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one summary row per experiment file
    Summarize {
        /// Directory searched recursively for *.csv experiment files
        #[arg(short, long)]
        input: PathBuf,
        /// Summary CSV to create
        #[arg(short, long)]
        output: PathBuf,
        /// Number of parallel workers (0 = auto)
        #[arg(long, default_value = "0")]
        workers: usize,
        /// Denominator of the percent-optimal columns (default: instances found per file)
        #[arg(long)]
        instances_per_experiment: Option<usize>,
    },
    /// Print the summary of a single experiment file
    Inspect {
        /// Path to the experiment .csv file
        file: PathBuf,
        /// Denominator of the percent-optimal columns (default: instances found in the file)
        #[arg(long)]
        instances_per_experiment: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            input,
            output,
            workers,
            instances_per_experiment,
        } => commands::summarize::run(&input, &output, workers, instances_per_experiment),
        Commands::Inspect {
            file,
            instances_per_experiment,
        } => commands::inspect::run(&file, instances_per_experiment),
    }
}
