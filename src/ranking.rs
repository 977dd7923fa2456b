//! Ranked snapshot handed to renderers.

use serde::{Deserialize, Serialize};

use crate::{Color, TimerRegistry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTimer {
    pub name: String,
    #[serde(rename = "avgTimeGPU")]
    pub avg_time_gpu: f64,
    #[serde(rename = "avgTimeCPU")]
    pub avg_time_cpu: f64,
    pub color: Color,
}

impl RankedTimer {
    pub fn avg_total(&self) -> f64 {
        self.avg_time_gpu + self.avg_time_cpu
    }
}

/// Every tracked timer, most expensive first, plus the frame's rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    #[serde(rename = "frameRate")]
    pub frame_rate: f64,
    pub timers: Vec<RankedTimer>,
}

impl Ranking {
    pub(crate) fn from_registry(registry: &TimerRegistry, frame_rate: f64) -> Self {
        let timers = registry
            .all()
            .iter()
            .map(|rec| RankedTimer {
                name: rec.name.clone(),
                avg_time_gpu: rec.avg_time_gpu,
                avg_time_cpu: rec.avg_time_cpu,
                color: rec.color.clone(),
            })
            .collect();
        Self { frame_rate, timers }
    }

    pub fn top(&self, n: usize) -> &[RankedTimer] {
        &self.timers[..n.min(self.timers.len())]
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(_: &str) -> Color {
        Color::from_rgb(90, 90, 90)
    }

    #[test]
    fn top_truncates_without_touching_full_sequence() {
        let mut reg = TimerRegistry::new();
        for i in 0..12 {
            reg.upsert_raw(&format!("t{i}"), 2000.0 + i as f64, 0.0, &gray);
        }
        let ranking = Ranking::from_registry(&reg, 60.0);
        assert_eq!(ranking.len(), 12);
        assert_eq!(ranking.top(10).len(), 10);
        assert_eq!(ranking.top(50).len(), 12);
        assert!(ranking.top(0).is_empty());
    }

    #[test]
    fn serializes_output_contract_fields() {
        let mut reg = TimerRegistry::new();
        reg.upsert_raw("Render", 5000.0, 250.0, &gray);
        let json = serde_json::to_value(Ranking::from_registry(&reg, 30.0)).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "frameRate": 30.0,
                "timers": [{
                    "name": "Render",
                    "avgTimeGPU": 5000.0,
                    "avgTimeCPU": 250.0,
                    "color": "#5a5a5a"
                }]
            })
        );
    }
}
