//! Bar-chart layout and HTML overlay output for a ranking.

use serde::Serialize;

use crate::{Color, DisplaySettings, RankedTimer, Ranking};

const NS_TO_MS: f64 = 0.000_001;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarRow {
    pub name: String,
    pub color: Color,
    pub gpu_width: f64,
    pub cpu_width: f64,
    pub gpu_label: String,
    pub cpu_label: String,
}

/// Milliseconds with one decimal, e.g. `"4.2 ms"`.
pub fn format_ms(ns: f64) -> String {
    format!("{:.1} ms", ns * NS_TO_MS)
}

pub fn bar_rows(ranking: &Ranking, display: &DisplaySettings) -> Vec<BarRow> {
    ranking
        .top(display.limit)
        .iter()
        .map(|t| bar_row(t, display))
        .collect()
}

fn bar_row(timer: &RankedTimer, display: &DisplaySettings) -> BarRow {
    let width = f64::from(display.width_px);
    BarRow {
        name: timer.name.clone(),
        color: timer.color.clone(),
        gpu_width: width * timer.avg_time_gpu / display.max_value,
        cpu_width: width * timer.avg_time_cpu / display.max_value,
        gpu_label: format!("gpu: {}", format_ms(timer.avg_time_gpu)),
        cpu_label: format!("cpu: {}", format_ms(timer.avg_time_cpu)),
    }
}

pub fn render_html(ranking: &Ranking, display: &DisplaySettings) -> String {
    let mut out = format!(
        "<div class=\"label\"><strong>FPS: {:.2}</strong></div>",
        ranking.frame_rate
    );
    for row in bar_rows(ranking, display) {
        let color = escape_html(row.color.as_str());
        out.push_str("<div class=\"statistics-item\">");
        out.push_str(&bar_html("gpu", &color, row.gpu_width, &row.gpu_label));
        out.push_str(&bar_html("cpu", &color, row.cpu_width, &row.cpu_label));
        out.push_str(&format!(
            "<div class=\"label\">{}</div></div>",
            escape_html(&row.name)
        ));
    }
    out
}

fn bar_html(kind: &str, color: &str, width: f64, label: &str) -> String {
    format!(
        "<div class=\"bar {kind}\" style=\"background-color:{color}; width:{width}px\">\
         <div class=\"label\">{label}</div></div>"
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
