//! Per-frame aggregation: merge samples, retire idle timers, smooth, rank.

use std::collections::HashSet;

use crate::{
    AggregationSettings, Colorizer, Ranking, SampleFrame, StatsError, StatsResult, TimerRegistry,
};

/// Owns the timer registry and advances it one frame at a time.
pub struct Aggregator {
    settings: AggregationSettings,
    colorizer: Box<dyn Colorizer>,
    registry: TimerRegistry,
    frames_seen: u64,
}

#[derive(Default)]
pub struct AggregatorBuilder {
    settings: AggregationSettings,
    colorizer: Option<Box<dyn Colorizer>>,
}

impl AggregatorBuilder {
    pub fn settings(mut self, settings: AggregationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn colorizer(mut self, colorizer: impl Colorizer + 'static) -> Self {
        self.colorizer = Some(Box::new(colorizer));
        self
    }

    pub fn build(self) -> StatsResult<Aggregator> {
        let colorizer = self.colorizer.ok_or(StatsError::MissingColorizer)?;
        Ok(Aggregator {
            settings: self.settings,
            colorizer,
            registry: TimerRegistry::new(),
            frames_seen: 0,
        })
    }
}

impl Aggregator {
    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::default()
    }

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Folds one frame into the registry and returns the full ranking.
    pub fn ingest(&mut self, frame: &SampleFrame) -> Ranking {
        self.frames_seen = self.frames_seen.saturating_add(1);

        let consumed = self.reset_times(frame);
        let created = self.add_new_timers(frame, &consumed);

        let threshold = self.settings.min_time;
        let retired = self.registry.remove_where(|rec| rec.is_negligible(threshold));
        for name in &retired {
            tracing::debug!(timer = %name, "retired negligible timer");
        }

        self.smooth();

        self.registry.sort_by(|a, b| b.avg_total().total_cmp(&a.avg_total()));

        tracing::trace!(
            frame = self.frames_seen,
            samples = frame.len(),
            created,
            retired = retired.len(),
            tracked = self.registry.len(),
            "aggregated frame"
        );

        Ranking::from_registry(&self.registry, frame.frame_rate)
    }

    /// Copies this frame's values into tracked timers and zeroes the rest.
    ///
    /// Values are taken as-is for tracked timers, including negative ones.
    fn reset_times<'f>(&mut self, frame: &'f SampleFrame) -> HashSet<&'f str> {
        let mut consumed = HashSet::new();
        for rec in self.registry.all_mut() {
            match frame.timers.get_key_value(rec.name.as_str()) {
                Some((name, sample)) => {
                    rec.time_gpu = sample.gpu;
                    rec.time_cpu = sample.cpu;
                    consumed.insert(name.as_str());
                }
                None => {
                    rec.time_gpu = 0.0;
                    rec.time_cpu = 0.0;
                }
            }
        }
        consumed
    }

    /// Creates records for names not tracked yet whose GPU time is non-negative;
    /// anything else means the timer has no sample this frame.
    fn add_new_timers(&mut self, frame: &SampleFrame, consumed: &HashSet<&str>) -> usize {
        let mut created = 0;
        for (name, sample) in &frame.timers {
            let has_sample = sample.gpu >= 0.0;
            if consumed.contains(name.as_str()) || !has_sample {
                continue;
            }
            self.registry.upsert_raw(name, sample.gpu, sample.cpu, &*self.colorizer);
            tracing::debug!(
                timer = %name,
                gpu = sample.gpu,
                cpu = sample.cpu,
                "tracking new timer"
            );
            created += 1;
        }
        created
    }

    fn smooth(&mut self) {
        let weight = 1.0 - self.settings.alpha;
        for rec in self.registry.all_mut() {
            rec.avg_time_gpu += (rec.time_gpu - rec.avg_time_gpu) * weight;
            rec.avg_time_cpu += (rec.time_cpu - rec.avg_time_cpu) * weight;
        }
    }
}
