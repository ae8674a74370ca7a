//! PackIt runner CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use packit_runner::{logging, scenario, BatchRunner, RequestParser, RunnerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pack-runner")]
#[command(about = "Solve container loading requests with PackIt")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single JSON request file
    Solve {
        /// Path to the request file
        file: PathBuf,

        /// Time limit in milliseconds (overrides the request)
        #[arg(short, long)]
        time_limit: Option<u64>,

        /// Maximum instance placement attempts (overrides the request)
        #[arg(short, long)]
        max_iterations: Option<u64>,

        /// Group adjacent instances into one configuration
        #[arg(short, long)]
        group: bool,

        /// Output file for the response (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Solve several request files in parallel
    Batch {
        /// Request files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Time limit in milliseconds for every request
        #[arg(short, long)]
        time_limit: Option<u64>,

        /// Output file for the batch report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the built-in acceptance scenarios
    Scenarios,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            time_limit,
            max_iterations,
            group,
            output,
        } => {
            let request = RequestParser::new()
                .parse_file(&file)
                .with_context(|| format!("loading {}", file.display()))?;

            let config = RunnerConfig::new()
                .with_time_limit(time_limit)
                .with_max_iterations(max_iterations)
                .with_group_adjacent(group);

            let record = BatchRunner::new(config).run_request(&file.display().to_string(), request);
            let json = serde_json::to_string_pretty(&record.response)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Response saved to: {}", path.display());
                }
                None => println!("{}", json),
            }

            if !record.success {
                anyhow::bail!(
                    "request failed: {}",
                    record.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
        }

        Commands::Batch {
            files,
            time_limit,
            output,
        } => {
            let runner = BatchRunner::new(RunnerConfig::new().with_time_limit(time_limit));
            let results = runner.run_files(&files);

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }
        }

        Commands::Scenarios => {
            let outcomes = scenario::run_all();
            let mut failed = 0;

            for outcome in &outcomes {
                if outcome.passed() {
                    println!("  ok    {}", outcome.name);
                } else {
                    failed += 1;
                    println!("  FAIL  {}", outcome.name);
                    for failure in &outcome.failures {
                        println!("          {}", failure);
                    }
                }
            }

            println!("\n{} scenarios, {} failed", outcomes.len(), failed);
            if failed > 0 {
                anyhow::bail!("{} scenario(s) failed", failed);
            }
        }
    }

    Ok(())
}
