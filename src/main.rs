use clap::{Parser, Subcommand};
use pagestack::OutputFormat;
use pagestack::core::NavSnapshot;
use pagestack::core::config::{self, CliOverrides};
use pagestack::replay::{Replay, Scenario, Step, render_text};
use serde::Serialize;
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagestack", about = "Replays browse navigation against a reusable slot pool")]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario and print the navigation state after every step
    Replay {
        scenario: PathBuf,
        /// Slots in the pool when the scenario does not set one
        #[arg(long)]
        pool_size: Option<u32>,
        /// Snapshot format printed after each step
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// Validate a scenario file without running it
    Check { scenario: PathBuf },
}

/// One JSON line of replay output.
#[derive(Serialize)]
struct StepReport<'a> {
    step: usize,
    action: &'a Step,
    state: &'a NavSnapshot,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let mut cli = CliOverrides {
        log_level: args.log_level.clone(),
        ..Default::default()
    };
    if let Command::Replay {
        pool_size, output, ..
    } = &args.command
    {
        cli.pool_size = *pool_size;
        cli.output = *output;
    }

    let file_config = config::load_config()?;
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Pagestack starting up: {:?}", resolved);

    match args.command {
        Command::Check { scenario } => {
            let loaded = Scenario::load(&scenario)?;
            println!(
                "{}: ok ({} steps)",
                scenario.display(),
                loaded.steps.len()
            );
        }
        Command::Replay { scenario, .. } => {
            let loaded = Scenario::load(&scenario)?;
            let pool_size = loaded.pool_size.unwrap_or(resolved.pool_size);
            log::info!(
                "Replaying {} ({} steps, {} slots)",
                scenario.display(),
                loaded.steps.len(),
                pool_size
            );

            let mut replay = Replay::new(pool_size, loaded.app.as_deref())?;
            let mut write_error = None;
            replay.run(&loaded.steps, |index, step, snapshot| match resolved.output {
                OutputFormat::Text => {
                    println!("{:>3} {:<28} {}", index + 1, step.to_string(), render_text(snapshot));
                }
                OutputFormat::Json => {
                    let report = StepReport {
                        step: index + 1,
                        action: step,
                        state: snapshot,
                    };
                    match serde_json::to_string(&report) {
                        Ok(text) => println!("{text}"),
                        Err(e) => {
                            write_error.get_or_insert(e);
                        }
                    }
                }
            })?;
            if let Some(e) = write_error {
                return Err(e.into());
            }
        }
    }

    Ok(())
}
