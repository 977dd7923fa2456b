//! Per-frame timer samples as delivered by the transport.

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::{StatsError, StatsResult};

/// One timer's measured durations for a single frame, in nanoseconds.
///
/// On the wire this is the two-element array `[gpu, cpu]`. A negative `gpu`
/// marks "no sample this frame" for timers that are not tracked yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct TimerSample {
    pub gpu: f64,
    pub cpu: f64,
}

impl TimerSample {
    pub fn new(gpu: f64, cpu: f64) -> Self {
        Self { gpu, cpu }
    }
}

impl From<[f64; 2]> for TimerSample {
    fn from([gpu, cpu]: [f64; 2]) -> Self {
        Self { gpu, cpu }
    }
}

impl From<TimerSample> for [f64; 2] {
    fn from(s: TimerSample) -> Self {
        [s.gpu, s.cpu]
    }
}

/// The complete set of timer readings for one frame plus its measured rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleFrame {
    pub timers: BTreeMap<String, TimerSample>,
    pub frame_rate: f64,
}

impl SampleFrame {
    pub fn new(timers: BTreeMap<String, TimerSample>, frame_rate: f64) -> StatsResult<Self> {
        if !frame_rate.is_finite() {
            return Err(StatsError::Sample(format!("frame rate must be finite, got {frame_rate}")));
        }
        if let Some((name, s)) = timers
            .iter()
            .find(|(_, s)| !s.gpu.is_finite() || !s.cpu.is_finite())
        {
            return Err(StatsError::Sample(format!(
                "timer {name:?} has non-finite sample [{}, {}]",
                s.gpu, s.cpu
            )));
        }
        Ok(Self { timers, frame_rate })
    }

    pub fn empty(frame_rate: f64) -> Self {
        Self {
            timers: BTreeMap::new(),
            frame_rate,
        }
    }

    /// Parses the serialized `{name: [gpu, cpu]}` mapping delivered alongside
    /// a separately measured frame rate.
    pub fn from_json(data: &str, frame_rate: f64) -> StatsResult<Self> {
        let timers: BTreeMap<String, TimerSample> = serde_json::from_str(data)
            .map_err(|e| StatsError::Sample(format!("invalid timer mapping: {e}")))?;
        Self::new(timers, frame_rate)
    }

    pub fn with_timer(mut self, name: impl Into<String>, gpu: f64, cpu: f64) -> Self {
        self.timers.insert(name.into(), TimerSample::new(gpu, cpu));
        self
    }

    pub fn sample(&self, name: &str) -> Option<TimerSample> {
        self.timers.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// One line of a recorded frame stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameEnvelope {
    #[serde(rename = "frameRate")]
    pub frame_rate: f64,
    #[serde(default)]
    pub timers: BTreeMap<String, TimerSample>,
}

impl TryFrom<FrameEnvelope> for SampleFrame {
    type Error = StatsError;

    fn try_from(env: FrameEnvelope) -> StatsResult<Self> {
        SampleFrame::new(env.timers, env.frame_rate)
    }
}

impl From<&SampleFrame> for FrameEnvelope {
    fn from(frame: &SampleFrame) -> Self {
        Self {
            frame_rate: frame.frame_rate,
            timers: frame.timers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_to_pair_mapping() {
        let frame = SampleFrame::from_json(r#"{"Render": [5000, 120], "Shadows": [-1, -1]}"#, 59.5)
            .expect("frame");
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.sample("Render"), Some(TimerSample::new(5000.0, 120.0)));
        assert_eq!(frame.sample("Shadows"), Some(TimerSample::new(-1.0, -1.0)));
        assert_eq!(frame.frame_rate, 59.5);
    }

    #[test]
    fn rejects_wrong_shapes() {
        for bad in [
            r#"{"Render": [1]}"#,
            r#"{"Render": [1, 2, 3]}"#,
            r#"{"Render": {"gpu": 1, "cpu": 2}}"#,
            r#"{"Render": ["1", "2"]}"#,
            r#"["Render"]"#,
        ] {
            let err = SampleFrame::from_json(bad, 60.0).expect_err(bad);
            assert!(matches!(err, StatsError::Sample(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn rejects_non_finite_frame_rate() {
        assert!(matches!(
            SampleFrame::from_json("{}", f64::NAN),
            Err(StatsError::Sample(_))
        ));
    }

    #[test]
    fn rejects_non_finite_timer_values() {
        for (gpu, cpu) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 10.0)] {
            let timers = BTreeMap::from([("bad".to_string(), TimerSample::new(gpu, cpu))]);
            let err = SampleFrame::new(timers, 60.0).expect_err("non-finite sample");
            assert!(matches!(err, StatsError::Sample(_)), "{err}");
        }
    }

    #[test]
    fn envelope_uses_pair_encoding() {
        let frame = SampleFrame::empty(30.0).with_timer("Ui", 2000.0, 10.0);
        let json = serde_json::to_string(&FrameEnvelope::from(&frame)).expect("json");
        assert_eq!(json, r#"{"frameRate":30.0,"timers":{"Ui":[2000.0,10.0]}}"#);
    }

    #[test]
    fn envelope_without_timers_is_empty_frame() {
        let env: FrameEnvelope = serde_json::from_str(r#"{"frameRate": 60}"#).expect("env");
        let frame = SampleFrame::try_from(env).expect("frame");
        assert!(frame.is_empty());
    }
}
