//! Chart specification types
//!
//! A `ChartSpec` is the renderer-agnostic description of one piece's
//! timeline. It is the only artifact handed to a rendering sink.

use crate::cadence::DashStyle;
use crate::model::{AxisValue, Category, GroupingAxis};
use serde::Serialize;

/// One key region drawn as a horizontal bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub start: f64,
    pub end: f64,
    pub category: Category,
    pub color: &'static str,
}

/// All bars sharing one key label, stacked under a single row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGroup {
    pub label: String,
    pub axis_value: AxisValue,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
    pub dash: DashStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    PhraseBoundary,
    Cadence,
}

/// A full-height vertical line at `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineShape {
    pub kind: ShapeKind,
    pub x: f64,
    pub line: LineStyle,
}

/// A text label placed at data `x` and paper `y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPoint {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Invisible points that only carry hover text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverLayer {
    pub name: String,
    pub points: Vec<HoverPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Continuous numeric axis; fractional ticks stay as they are
    Linear,
    /// One row per bar group
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub kind: AxisKind,
}

/// The complete, renderer-agnostic chart for one piece.
///
/// # Fields
/// - `groups`: bar rows in display order
/// - `shapes`: phrase-boundary lines first, then cadence lines, each by position
/// - `annotations`: cadence labels
/// - `hover`: cadence hover targets; `None` when the piece has no cadences
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub grouping_axis: GroupingAxis,
    pub groups: Vec<BarGroup>,
    pub shapes: Vec<LineShape>,
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverLayer>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl ChartSpec {
    pub fn bar_count(&self) -> usize {
        self.groups.iter().map(|g| g.bars.len()).sum()
    }

    pub fn has_decoration(&self) -> bool {
        !self.shapes.is_empty() || !self.annotations.is_empty() || self.hover.is_some()
    }
}
