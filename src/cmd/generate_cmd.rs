//! `timerstat generate`: write a seeded synthetic frame stream.

use clap::Args;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::{StatsResult, SynthOptions, generate_frames, write_frames};

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    #[arg(long, default_value_t = 600)]
    pub frames: usize,
    #[arg(long, default_value_t = 8)]
    pub timers: usize,
    /// Write frames here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Returns a summary when frames went to a file; stdout output has none.
pub fn generate_command(args: &GenerateArgs) -> StatsResult<Option<serde_json::Value>> {
    let frames = generate_frames(&SynthOptions {
        seed: args.seed,
        frames: args.frames,
        timers: args.timers,
    })?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut w = BufWriter::new(File::create(path)?);
            write_frames(&mut w, &frames)?;
            Ok(Some(serde_json::json!({
                "frames": frames.len(),
                "seed": args.seed,
                "out": path.to_string_lossy().to_string(),
            })))
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            write_frames(&mut w, &frames)?;
            Ok(None)
        }
    }
}
