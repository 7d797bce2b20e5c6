//! # Plotly Rendering
//!
//! Turns a [`ChartSpec`] into a self-contained HTML page drawn by plotly.js.
//!
//! ## Figure Layout
//! - One horizontal bar trace per category, so the legend shows the colors
//! - Bar rows sit at numeric y positions `0..n` labeled with the group
//!   labels, which lets the hover targets live below row 0
//! - The x axis is forced to `linear` so fractional measure positions are
//!   never turned into categories or dates
//! - Lines span the full plot height (paper coordinates); labels use data x
//!   and paper y
//!
//! The figure is embedded as JSON; `</` is escaped so that no label can close
//! the surrounding script element.

use crate::chart::{AxisKind, ChartSpec};
use crate::model::Category;
use serde_json::{json, Value};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Plotly figure (`{"data": [...], "layout": {...}}`) for a chart.
pub fn plotly_figure(chart: &ChartSpec) -> Value {
    let mut data: Vec<Value> = Vec::new();

    for category in Category::ALL {
        let mut base = Vec::new();
        let mut width = Vec::new();
        let mut rows = Vec::new();
        let mut text = Vec::new();
        for (row, group) in chart.groups.iter().enumerate() {
            for bar in group.bars.iter().filter(|b| b.category == category) {
                base.push(bar.start);
                width.push(bar.end - bar.start);
                rows.push(row);
                text.push(format!("{}: {} - {}", group.label, bar.start, bar.end));
            }
        }
        if rows.is_empty() {
            continue;
        }
        data.push(json!({
            "type": "bar",
            "orientation": "h",
            "name": category.label(),
            "base": base,
            "x": width,
            "y": rows,
            "width": 0.8,
            "marker": { "color": category.color() },
            "hovertext": text,
            "hoverinfo": "text",
        }));
    }

    if let Some(hover) = &chart.hover {
        data.push(json!({
            "type": "scatter",
            "mode": "markers",
            "opacity": 0,
            "name": hover.name,
            "x": hover.points.iter().map(|p| p.x).collect::<Vec<_>>(),
            "y": hover.points.iter().map(|p| p.y).collect::<Vec<_>>(),
            "text": hover.points.iter().map(|p| p.text.clone()).collect::<Vec<_>>(),
            "hoverinfo": "text",
            "marker": {
                "size": 14,
                "line": { "width": 1 },
                "color": "red",
                "opacity": 0.3,
            },
        }));
    }

    let shapes: Vec<Value> = chart
        .shapes
        .iter()
        .map(|shape| {
            json!({
                "type": "line",
                "xref": "x",
                "yref": "paper",
                "x0": shape.x,
                "x1": shape.x,
                "y0": 0,
                "y1": 1,
                "line": shape.line,
            })
        })
        .collect();

    let annotations: Vec<Value> = chart
        .annotations
        .iter()
        .map(|anno| {
            json!({
                "x": anno.x,
                "y": anno.y,
                "xref": "x",
                "yref": "paper",
                "text": anno.text,
                "showarrow": false,
                "font": { "size": anno.font_size },
            })
        })
        .collect();

    let x_type = match chart.x_axis.kind {
        AxisKind::Linear => "linear",
        AxisKind::Category => "category",
    };

    json!({
        "data": data,
        "layout": {
            "title": { "text": chart.title },
            "barmode": "overlay",
            "hovermode": "closest",
            "showlegend": true,
            "xaxis": {
                "title": { "text": chart.x_axis.title },
                "type": x_type,
                "showgrid": true,
                "zeroline": false,
            },
            "yaxis": {
                "title": { "text": chart.y_axis.title },
                "type": "linear",
                "tickmode": "array",
                "tickvals": (0..chart.groups.len()).collect::<Vec<_>>(),
                "ticktext": chart.groups.iter().map(|g| g.label.clone()).collect::<Vec<_>>(),
                "showgrid": true,
                "zeroline": false,
            },
            "shapes": shapes,
            "annotations": annotations,
        },
    })
}

/// Standalone HTML page showing the chart.
pub fn to_plotly_html(chart: &ChartSpec) -> String {
    let figure = plotly_figure(chart).to_string().replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<script src="{cdn}" charset="utf-8"></script>
<style>
  html, body {{ margin: 0; height: 100%; }}
  #chart {{ width: 100%; height: 100%; min-height: 560px; }}
</style>
</head>
<body>
<div id="chart"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
        title = escape_html(&chart.title),
        cdn = PLOTLY_CDN,
        figure = figure,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
