//! Seeded synthetic frame streams for demos and soak testing.

use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore as _, SeedableRng as _};
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::{FrameEnvelope, StatsError, StatsResult, TimerSample};

const TIMER_NAMES: &[&str] = &[
    "Atmosphere",
    "Planets",
    "Stars",
    "Trajectories",
    "EclipseShadows",
    "Clouds",
    "Labels",
    "Gui",
    "Terrain",
    "Satellites",
    "WmsOverlays",
    "NodeEditor",
    "Tonemapping",
    "Bloom",
    "Skybox",
    "Vegetation",
];

/// Fixed per-frame cost outside any reported timer.
const BASE_FRAME_NS: f64 = 4_000_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SynthOptions {
    pub seed: u64,
    pub frames: usize,
    pub timers: usize,
}

#[derive(Debug, Clone)]
struct SynthTimer {
    name: String,
    gpu_ns: f64,
    cpu_ns: f64,
    jitter: f64,
    period: u64,
    active: u64,
    /// Inactive frames report `[-1, -1]` instead of being left out.
    sentinel_when_idle: bool,
}

impl SynthTimer {
    fn is_active(&self, frame: u64) -> bool {
        frame % self.period < self.active
    }
}

pub fn generate_frames(opts: &SynthOptions) -> StatsResult<Vec<FrameEnvelope>> {
    if opts.timers == 0 || opts.timers > TIMER_NAMES.len() {
        return Err(StatsError::InvalidArgument(format!(
            "timers must be between 1 and {}, got {}",
            TIMER_NAMES.len(),
            opts.timers
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
    let timers: Vec<SynthTimer> = TIMER_NAMES[..opts.timers]
        .iter()
        .map(|name| {
            let period = 20 + rng.next_u64() % 70;
            SynthTimer {
                name: name.to_string(),
                gpu_ns: lerp(200_000.0, 6_000_000.0, unit(&mut rng)),
                cpu_ns: lerp(50_000.0, 2_000_000.0, unit(&mut rng)),
                jitter: lerp(0.05, 0.3, unit(&mut rng)),
                period,
                active: period / 2 + rng.next_u64() % (period / 2),
                sentinel_when_idle: rng.next_u64() % 2 == 0,
            }
        })
        .collect();

    let mut out = Vec::with_capacity(opts.frames);
    for frame in 0..opts.frames as u64 {
        let mut samples = BTreeMap::new();
        let mut total_ns = BASE_FRAME_NS;
        for t in &timers {
            if t.is_active(frame) {
                let gpu = t.gpu_ns * (1.0 + t.jitter * (2.0 * unit(&mut rng) - 1.0));
                let cpu = t.cpu_ns * (1.0 + t.jitter * (2.0 * unit(&mut rng) - 1.0));
                total_ns += gpu.max(cpu);
                samples.insert(t.name.clone(), TimerSample::new(gpu.round(), cpu.round()));
            } else if t.sentinel_when_idle {
                samples.insert(t.name.clone(), TimerSample::new(-1.0, -1.0));
            }
        }
        out.push(FrameEnvelope {
            frame_rate: 1e9 / total_ns,
            timers: samples,
        });
    }
    tracing::debug!(
        seed = opts.seed,
        frames = out.len(),
        timers = timers.len(),
        "generated frames"
    );
    Ok(out)
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo + (hi - lo) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(seed: u64) -> SynthOptions {
        SynthOptions {
            seed,
            frames: 200,
            timers: 6,
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let a = generate_frames(&opts(7)).expect("a");
        let b = generate_frames(&opts(7)).expect("b");
        assert_eq!(a, b);
        assert_ne!(a, generate_frames(&opts(8)).expect("c"));
    }

    #[test]
    fn frames_are_well_formed() {
        let frames = generate_frames(&opts(3)).expect("frames");
        assert_eq!(frames.len(), 200);
        for f in &frames {
            assert!(f.frame_rate > 0.0 && f.frame_rate.is_finite());
            assert!(f.timers.len() <= 6);
            for s in f.timers.values() {
                assert!(s.gpu >= 0.0 || (s.gpu == -1.0 && s.cpu == -1.0));
            }
        }
    }

    #[test]
    fn timers_go_idle_at_some_point() {
        let frames = generate_frames(&opts(11)).expect("frames");
        let idle = frames
            .iter()
            .any(|f| f.timers.len() < 6 || f.timers.values().any(|s| s.gpu < 0.0));
        assert!(idle);
    }

    #[test]
    fn rejects_timer_count_out_of_range() {
        for timers in [0, TIMER_NAMES.len() + 1] {
            let opts = SynthOptions {
                seed: 1,
                frames: 1,
                timers,
            };
            let err = generate_frames(&opts).expect_err("range");
            assert!(matches!(err, StatsError::InvalidArgument(_)));
        }
    }
}
