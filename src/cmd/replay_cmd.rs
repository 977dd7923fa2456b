//! `timerstat replay`: feed a recorded frame stream through the aggregator.

use clap::Args;
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{
    Aggregator, ColorHash, Config, FrameReader, Ranking, StatsError, StatsResult, render_html,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reporter {
    Pretty,
    Json,
    Html,
}

impl clap::ValueEnum for Reporter {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Pretty, Self::Json, Self::Html]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Pretty => clap::builder::PossibleValue::new("pretty"),
            Self::Json => clap::builder::PossibleValue::new("json"),
            Self::Html => clap::builder::PossibleValue::new("html"),
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// NDJSON frame stream, or `-` for stdin.
    #[arg(value_name = "INPUT")]
    pub input: String,
    #[arg(long, default_value = "pretty")]
    pub format: Reporter,
    /// Write the rendered report here instead of stdout (json/html only).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Keep a ranking snapshot every N frames; by default only the final one.
    #[arg(long)]
    pub every: Option<u64>,
    /// Override the number of timers drawn.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySnapshot {
    pub frame: u64,
    pub ranking: Ranking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    pub frames: u64,
    pub snapshots: Vec<ReplaySnapshot>,
}

impl ReplayReport {
    pub fn last(&self) -> Option<&ReplaySnapshot> {
        self.snapshots.last()
    }
}

pub fn replay_command(config: &Config, args: &ReplayArgs) -> StatsResult<ReplayReport> {
    if args.every == Some(0) {
        return Err(StatsError::InvalidArgument("--every must be at least 1".to_string()));
    }
    if args.input == "-" {
        let stdin = std::io::stdin();
        replay_stream(config, stdin.lock(), args.every)
    } else {
        let file = File::open(&args.input).map_err(|e| {
            StatsError::InvalidArgument(format!("cannot open {:?}: {e}", args.input))
        })?;
        replay_stream(config, BufReader::new(file), args.every)
    }
}

pub fn replay_stream<R: BufRead>(
    config: &Config,
    input: R,
    every: Option<u64>,
) -> StatsResult<ReplayReport> {
    let mut aggregator = Aggregator::builder()
        .settings(config.aggregation)
        .colorizer(ColorHash::from_settings(&config.color))
        .build()?;

    let mut snapshots = Vec::new();
    let mut last = None;
    for frame in FrameReader::new(input) {
        let ranking = aggregator.ingest(&frame?);
        let n = aggregator.frames_seen();
        if every.is_some_and(|every| n % every == 0) {
            snapshots.push(ReplaySnapshot {
                frame: n,
                ranking: ranking.clone(),
            });
        }
        last = Some(ranking);
    }

    let frames = aggregator.frames_seen();
    if let Some(ranking) = last
        && snapshots.last().map(|s| s.frame) != Some(frames)
    {
        snapshots.push(ReplaySnapshot { frame: frames, ranking });
    }
    tracing::info!(frames, tracked = aggregator.registry().len(), "replay finished");

    Ok(ReplayReport {
        schema_version: "timerstat.replay.v1".to_string(),
        frames,
        snapshots,
    })
}

/// Renders the report for file output; pretty output is terminal-only.
pub fn render_report(
    config: &Config,
    report: &ReplayReport,
    format: Reporter,
) -> StatsResult<String> {
    match format {
        Reporter::Json => Ok(serde_json::to_string_pretty(report)?),
        Reporter::Html => Ok(report
            .last()
            .map(|s| render_html(&s.ranking, &config.display))
            .unwrap_or_else(|| render_html(&Ranking::default(), &config.display))),
        Reporter::Pretty => Err(StatsError::InvalidArgument(
            "pretty output cannot be written to a file (use --format json or html)".to_string(),
        )),
    }
}

pub fn write_report(
    config: &Config,
    report: &ReplayReport,
    format: Reporter,
    out: &Path,
) -> StatsResult<()> {
    let content = render_report(config, report, format)?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, content)?;
    Ok(())
}
