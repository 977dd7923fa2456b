mod cli_logger;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process::ExitCode;

use cli_logger::CliLogger;
use timerstat::{
    Config, GenerateArgs, ReplayArgs, Reporter, frame_schema_doc, generate_command, render_report,
    replay_command, write_report,
};

#[derive(Debug, Parser)]
#[command(name = "timerstat", version, about = "Rank and smooth per-frame GPU/CPU timers")]
struct Cli {
    /// Config file; missing files fall back to defaults.
    #[arg(long, global = true, default_value = "timerstat.toml")]
    config: PathBuf,
    /// Machine-readable output.
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate a recorded NDJSON frame stream and print the ranking.
    Replay(ReplayArgs),
    /// Write a seeded synthetic frame stream as NDJSON.
    Generate(GenerateArgs),
    /// Describe the frame stream format.
    Schema,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let logger = CliLogger::new(cli.json, cli.no_color);
    match run(&cli, &logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger.print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, logger: &CliLogger) -> Result<()> {
    let mut config = Config::load_optional(&cli.config);
    match &cli.command {
        Command::Replay(args) => {
            if let Some(limit) = args.limit {
                config.display.limit = limit;
            }
            let report = replay_command(&config, args)?;
            if let Some(out) = &args.out {
                write_report(&config, &report, args.format, out)?;
                return logger.print_serialized(&serde_json::json!({
                    "frames": report.frames,
                    "out": out.to_string_lossy().to_string(),
                }));
            }
            match args.format {
                Reporter::Pretty => logger.print_replay(&report, &config.display),
                Reporter::Json | Reporter::Html => {
                    println!("{}", render_report(&config, &report, args.format)?);
                    Ok(())
                }
            }
        }
        Command::Generate(args) => match generate_command(args)? {
            Some(summary) => logger.print_serialized(&summary),
            None => Ok(()),
        },
        Command::Schema => logger.print_serialized(&frame_schema_doc()),
    }
}
