//! Chart assembly engine
//!
//! Composes key-region bars, phrase-boundary lines and cadence markers into
//! a single [`ChartSpec`]. Inputs are only read, and the output order depends
//! on positions alone, so identical inputs give identical charts.

use super::types::*;
use crate::cadence::{CadenceMarker, DashStyle};
use crate::fraction::Fraction;
use crate::model::{GroupingAxis, KeyRegion};
use std::collections::HashMap;

pub const PHRASE_LINE: LineStyle = LineStyle {
    color: "rgb(0, 0, 0)",
    width: 0.2,
    dash: DashStyle::LongDash,
};

pub const CADENCE_LINE_COLOR: &str = "rgb(55, 128, 191)";

/// Paper height of the lower cadence label row.
pub const LABEL_BASE_Y: f64 = -0.01;

pub const LABEL_FONT_SIZE: u8 = 7;

pub const HOVER_LAYER_NAME: &str = "Cadences";

/// Everything the assembler needs for one piece.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub regions: &'a [KeyRegion],
    pub phrase_boundaries: &'a [Fraction],
    pub markers: &'a [CadenceMarker],
    pub title: &'a str,
    pub axis: GroupingAxis,
}

/// Build the chart specification.
pub fn assemble(input: &ChartInput) -> ChartSpec {
    let mut shapes = phrase_lines(input.phrase_boundaries);
    let mut annotations = Vec::new();

    for marker in input.markers {
        let Some(style) = marker.style else {
            continue;
        };
        shapes.push(LineShape {
            kind: ShapeKind::Cadence,
            x: marker.position,
            line: LineStyle {
                color: CADENCE_LINE_COLOR,
                width: style.width,
                dash: style.dash,
            },
        });
        annotations.push(Annotation {
            x: marker.position,
            y: LABEL_BASE_Y + marker.label_offset(),
            text: style.label.to_string(),
            font_size: LABEL_FONT_SIZE,
        });
    }

    ChartSpec {
        title: input.title.to_string(),
        grouping_axis: input.axis,
        groups: group_bars(input.regions),
        shapes,
        annotations,
        hover: hover_layer(input.markers),
        x_axis: Axis {
            title: "Measures".to_string(),
            kind: AxisKind::Linear,
        },
        y_axis: Axis {
            title: "Tonicized keys".to_string(),
            kind: AxisKind::Category,
        },
    }
}

/// One group per key label, ordered by axis value (highest first), then label.
fn group_bars(regions: &[KeyRegion]) -> Vec<BarGroup> {
    let mut groups: Vec<BarGroup> = Vec::new();
    let mut index_by_label: HashMap<&str, usize> = HashMap::new();

    for region in regions {
        let bar = Bar {
            start: region.start.to_f64(),
            end: region.end.to_f64(),
            category: region.category,
            color: region.category.color(),
        };
        match index_by_label.get(region.key.as_str()) {
            Some(&i) => groups[i].bars.push(bar),
            None => {
                index_by_label.insert(region.key.as_str(), groups.len());
                groups.push(BarGroup {
                    label: region.key.clone(),
                    axis_value: region.axis_value.clone(),
                    bars: vec![bar],
                });
            }
        }
    }

    for group in &mut groups {
        group.bars.sort_by(|a, b| a.start.total_cmp(&b.start));
    }
    groups.sort_by(|a, b| {
        b.axis_value
            .cmp(&a.axis_value)
            .then_with(|| a.label.cmp(&b.label))
    });
    groups
}

fn phrase_lines(boundaries: &[Fraction]) -> Vec<LineShape> {
    let mut sorted = boundaries.to_vec();
    sorted.sort();
    sorted
        .into_iter()
        .map(|position| LineShape {
            kind: ShapeKind::PhraseBoundary,
            x: position.to_f64(),
            line: PHRASE_LINE,
        })
        .collect()
}

fn hover_layer(markers: &[CadenceMarker]) -> Option<HoverLayer> {
    if markers.is_empty() {
        return None;
    }
    Some(HoverLayer {
        name: HOVER_LAYER_NAME.to_string(),
        points: markers
            .iter()
            .map(|marker| HoverPoint {
                x: marker.position,
                y: marker.hover_y(),
                text: marker.hover_text.clone(),
            })
            .collect(),
    })
}
