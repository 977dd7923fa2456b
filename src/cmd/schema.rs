//! Frame stream format introspection for producers.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FrameSchemaDoc {
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    #[serde(rename = "lineFormat")]
    pub line_format: &'static str,
    #[serde(rename = "requiredKeys")]
    pub required_keys: Vec<&'static str>,
    #[serde(rename = "optionalKeys")]
    pub optional_keys: Vec<&'static str>,
    #[serde(rename = "timeUnit")]
    pub time_unit: &'static str,
    pub notes: Vec<&'static str>,
    #[serde(rename = "minimalExample")]
    pub minimal_example: serde_json::Value,
}

pub fn frame_schema_doc() -> FrameSchemaDoc {
    FrameSchemaDoc {
        schema_version: "timerstat.frame_schema.v1".to_string(),
        line_format: "ndjson",
        required_keys: vec!["frameRate"],
        optional_keys: vec!["timers"],
        time_unit: "nanoseconds",
        notes: vec![
            "timers maps a timer name to [gpuTime, cpuTime]",
            "a negative gpuTime means no sample this frame for timers not tracked yet",
            "tracked timers take reported values literally; omit a timer to zero it",
            "frameRate is passed through for display only",
        ],
        minimal_example: serde_json::json!({
            "frameRate": 60.0,
            "timers": {
                "Atmosphere": [2_400_000, 310_000],
                "Gui": [-1, -1]
            }
        }),
    }
}
