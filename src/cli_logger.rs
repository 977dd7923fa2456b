use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use timerstat::{BarRow, DisplaySettings, ReplayReport, bar_rows};

const BAR_COLUMNS: f64 = 40.0;

pub struct CliLogger {
    json: bool,
    no_color: bool,
}

impl CliLogger {
    pub fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    pub fn print_serialized<T: Serialize>(&self, value: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(value)?);
            return Ok(());
        }

        let rendered = render_value(&serde_json::to_value(value)?, 0);
        println!("{rendered}");
        Ok(())
    }

    pub fn print_replay(&self, report: &ReplayReport, display: &DisplaySettings) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(report)?);
            return Ok(());
        }

        let mut out = String::new();
        for snapshot in &report.snapshots {
            out.push_str(&format!(
                "{} {} {} {:.2}\n",
                self.style("frame", "90"),
                snapshot.frame,
                self.style("fps", "90"),
                snapshot.ranking.frame_rate
            ));
            let rows = bar_rows(&snapshot.ranking, display);
            if rows.is_empty() {
                out.push_str(&format!("  {}\n", self.style("no significant timers", "90")));
            }
            let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in &rows {
                out.push_str(&self.render_row(row, name_width, display));
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {} frames, {} snapshot(s)",
            self.style("timerstat", "36;1"),
            report.frames,
            report.snapshots.len()
        ));
        println!("{}", out.trim_end());
        Ok(())
    }

    pub fn print_error(&self, msg: &str) {
        if self.json {
            let out = serde_json::json!({
                "status": "error",
                "code": "error",
                "message": msg,
            });
            println!("{out}");
            return;
        }
        eprintln!("{} {msg}", self.style("error", "31;1"));
    }

    fn render_row(&self, row: &BarRow, name_width: usize, display: &DisplaySettings) -> String {
        // BarRow widths are in pixels of `display.width_px`; rescale to columns.
        let scale = BAR_COLUMNS / f64::from(display.width_px.max(1));
        let gpu = bar_cells(row.gpu_width * scale);
        let cpu = bar_cells(row.cpu_width * scale);
        format!(
            "  {:<name_width$}  {} {}\n  {:<name_width$}  {} {}\n",
            row.name,
            self.paint(&gpu, row),
            self.style(&row.gpu_label, "37"),
            "",
            self.paint(&cpu, row),
            self.style(&row.cpu_label, "90"),
        )
    }

    fn paint(&self, bar: &str, row: &BarRow) -> String {
        match row.color.rgb() {
            Some((r, g, b)) if !self.no_color => format!("\x1b[38;2;{r};{g};{b}m{bar}\x1b[0m"),
            _ => bar.to_string(),
        }
    }

    fn style(&self, text: &str, ansi: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        format!("\x1b[{ansi}m{text}\x1b[0m")
    }
}

fn bar_cells(columns: f64) -> String {
    let n = columns.round().clamp(0.0, BAR_COLUMNS) as usize;
    if n == 0 && columns > 0.0 {
        return "▏".to_string();
    }
    "█".repeat(n)
}

fn render_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => render_array(items, indent),
        Value::Object(map) => render_object(map, indent),
    }
}

fn render_array(items: &[Value], indent: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let pad = " ".repeat(indent);
    let mut out = String::new();
    for item in items {
        match item {
            Value::Object(_) | Value::Array(_) => {
                out.push_str(&format!("{pad}-\n{}\n", render_value(item, indent + 2)));
            }
            _ => out.push_str(&format!("{pad}- {}\n", render_value(item, indent + 2))),
        }
    }
    out.trim_end().to_string()
}

fn render_object(map: &serde_json::Map<String, Value>, indent: usize) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }

    let pad = " ".repeat(indent);
    let mut out = String::new();
    for (key, value) in map {
        match value {
            Value::Object(_) | Value::Array(_) => {
                out.push_str(&format!("{pad}{key}:\n{}\n", render_value(value, indent + 2)));
            }
            _ => out.push_str(&format!("{pad}{key}: {}\n", render_value(value, indent + 2))),
        }
    }
    out.trim_end().to_string()
}
