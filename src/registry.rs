//! Name-keyed store of tracked timers.

use serde::Serialize;

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{Color, Colorizer};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub name: String,
    /// Raw GPU duration of the current frame; zero when the timer did not report.
    #[serde(rename = "timeGPU")]
    pub time_gpu: f64,
    #[serde(rename = "timeCPU")]
    pub time_cpu: f64,
    #[serde(rename = "avgTimeGPU")]
    pub avg_time_gpu: f64,
    #[serde(rename = "avgTimeCPU")]
    pub avg_time_cpu: f64,
    pub color: Color,
}

impl TimerRecord {
    fn first_observation(name: String, gpu: f64, cpu: f64, color: Color) -> Self {
        Self {
            name,
            time_gpu: gpu,
            time_cpu: cpu,
            avg_time_gpu: gpu,
            avg_time_cpu: cpu,
            color,
        }
    }

    /// Combined smoothed cost used for ranking.
    pub fn avg_total(&self) -> f64 {
        self.avg_time_gpu + self.avg_time_cpu
    }

    /// True unless some raw or smoothed duration exceeds `threshold`.
    ///
    /// NaN never exceeds the threshold, so a record poisoned by NaN is negligible.
    pub fn is_negligible(&self, threshold: f64) -> bool {
        !(self.time_gpu > threshold
            || self.time_cpu > threshold
            || self.avg_time_gpu > threshold
            || self.avg_time_cpu > threshold)
    }
}

/// Records in insertion order with a name index kept in sync.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    records: Vec<TimerRecord>,
    index: HashMap<String, usize>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TimerRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TimerRecord> {
        let i = *self.index.get(name)?;
        self.records.get_mut(i)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Overwrites the raw fields of `name`, or creates it with `avg = raw`.
    ///
    /// The colorizer is only consulted on creation.
    pub fn upsert_raw(&mut self, name: &str, gpu: f64, cpu: f64, colorizer: &dyn Colorizer) {
        if let Some(rec) = self.get_mut(name) {
            rec.time_gpu = gpu;
            rec.time_cpu = cpu;
            return;
        }
        let color = colorizer.color(name);
        self.index.insert(name.to_string(), self.records.len());
        self.records.push(TimerRecord::first_observation(name.to_string(), gpu, cpu, color));
    }

    /// Drops every record matching `pred` and returns the dropped names.
    pub fn remove_where<P>(&mut self, mut pred: P) -> Vec<String>
    where
        P: FnMut(&TimerRecord) -> bool,
    {
        let mut removed = Vec::new();
        self.records.retain(|rec| {
            if pred(rec) {
                removed.push(rec.name.clone());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            self.reindex();
        }
        removed
    }

    /// Stable sort of the stored order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&TimerRecord, &TimerRecord) -> Ordering,
    {
        self.records.sort_by(compare);
        self.reindex();
    }

    pub fn all(&self) -> &[TimerRecord] {
        &self.records
    }

    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = &mut TimerRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, rec) in self.records.iter().enumerate() {
            self.index.insert(rec.name.clone(), i);
        }
    }
}
