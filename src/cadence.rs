//! # Cadence Marker Builder
//!
//! Maps raw cadence records to chart markers: a vertical line style, a short
//! label and a hover tooltip.
//!
//! ## Cadence Table
//! | code  | label | width | dash     |
//! |-------|-------|-------|----------|
//! | PAC   | PC    | 1.0   | solid    |
//! | IAC   | IC    | 0.5   | solid    |
//! | HC    | HC    | 0.5   | dash     |
//! | EVCAD | EC    | 0.5   | dash-dot |
//! | DEC   | DC    | 0.5   | dotted   |
//!
//! Any other code yields a marker without line or label. Its hover text still
//! uses the raw code, and a warning is returned alongside the markers.
//!
//! ## Label Staggering
//! Successive cadences alternate between two label levels, chosen by index
//! parity in position order, so close-together labels do not overlap.

use crate::error::ChartError;
use crate::model::{CadenceRecord, PieceContext};
use serde::Serialize;

/// Vertical distance between the two label levels, in paper coordinates.
pub const LABEL_OFFSET: f64 = 0.03;

/// Line dash styles, named as plotting engines name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    Solid,
    Dash,
    DashDot,
    Dot,
    LongDash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceKind {
    Perfect,
    Imperfect,
    Half,
    Evaded,
    Deceptive,
}

impl CadenceKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "PAC" => Some(CadenceKind::Perfect),
            "IAC" => Some(CadenceKind::Imperfect),
            "HC" => Some(CadenceKind::Half),
            "EVCAD" => Some(CadenceKind::Evaded),
            "DEC" => Some(CadenceKind::Deceptive),
            _ => None,
        }
    }

    pub fn style(&self) -> CadenceStyle {
        let (label, width, dash) = match self {
            CadenceKind::Perfect => ("PC", 1.0, DashStyle::Solid),
            CadenceKind::Imperfect => ("IC", 0.5, DashStyle::Solid),
            CadenceKind::Half => ("HC", 0.5, DashStyle::Dash),
            CadenceKind::Evaded => ("EC", 0.5, DashStyle::DashDot),
            CadenceKind::Deceptive => ("DC", 0.5, DashStyle::Dot),
        };
        CadenceStyle { label, width, dash }
    }
}

/// Short label and line style of a recognized cadence type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CadenceStyle {
    pub label: &'static str,
    pub width: f64,
    pub dash: DashStyle,
}

/// Style for a cadence-type code, or `None` for an unrecognized code.
pub fn classify(code: &str) -> Option<CadenceStyle> {
    CadenceKind::from_code(code).map(|kind| kind.style())
}

/// A cadence ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CadenceMarker {
    pub position: f64,
    pub code: String,
    /// `None` when the code is unrecognized: hover text only, no line or label
    pub style: Option<CadenceStyle>,
    /// Label level, 0 or 1, from the marker's index parity
    pub level: u8,
    pub hover_text: String,
}

impl CadenceMarker {
    /// Vertical label offset: 0 or [`LABEL_OFFSET`].
    pub fn label_offset(&self) -> f64 {
        self.level as f64 * LABEL_OFFSET
    }

    /// Height of the hover target below the axis.
    pub fn hover_y(&self) -> f64 {
        -0.5 - self.level as f64 * 0.5
    }
}

/// Markers for one piece plus the warnings raised while building them.
#[derive(Debug, Default)]
pub struct CadenceMarkers {
    pub markers: Vec<CadenceMarker>,
    pub warnings: Vec<ChartError>,
}

/// `"Cad: <type>[<br>Key: <key>]<br>Beat: <beat>"`
pub fn hover_text(record: &CadenceRecord) -> String {
    let mut text = format!("Cad: {}", record.code);
    if let Some(key) = &record.key {
        text.push_str("<br>Key: ");
        text.push_str(key);
    }
    text.push_str("<br>Beat: ");
    text.push_str(&record.beat);
    text
}

/// Build markers for all records, in position order.
///
/// Records sharing a position keep their input order.
pub fn build_markers(records: &[CadenceRecord], ctx: &PieceContext) -> CadenceMarkers {
    let mut ordered: Vec<&CadenceRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut result = CadenceMarkers::default();
    for (index, record) in ordered.into_iter().enumerate() {
        let style = classify(&record.code);
        if style.is_none() {
            result.warnings.push(ChartError::UnrecognizedCadenceCode {
                code: record.code.clone(),
                piece: ctx.piece.clone(),
            });
        }
        result.markers.push(CadenceMarker {
            position: record.position,
            code: record.code.clone(),
            style,
            level: (index % 2) as u8,
            hover_text: hover_text(record),
        });
    }
    result
}
