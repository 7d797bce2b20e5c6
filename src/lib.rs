pub mod cadence;
pub mod chart;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fraction;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod regions;
pub mod render;
pub mod site;

pub use cadence::{build_markers, classify, CadenceMarker, CadenceMarkers};
pub use chart::{assemble, ChartInput, ChartSpec};
pub use error::*;
pub use fraction::Fraction;
pub use input::{parse_piece, read_piece};
pub use model::*;
pub use pipeline::{run, RunSummary};
pub use regions::{
    derive_fractional_position, extract_cadences, extract_key_regions, extract_phrase_boundaries,
};
pub use render::to_plotly_html;

/// A chart plus the non-fatal diagnostics raised while building it.
#[derive(Debug)]
pub struct ChartBuild {
    pub chart: ChartSpec,
    pub warnings: Vec<ChartError>,
}

/// Build the chart for one piece.
/// This is the main entry point for the library.
///
/// Cadences annotated on events and the piece's explicit cadence list are
/// merged and drawn together.
pub fn build_chart(piece: &Piece, axis: GroupingAxis) -> Result<ChartBuild, ChartError> {
    let ctx = PieceContext::new(piece.metadata.name.clone());

    let regions = extract_key_regions(&piece.events, axis, piece.metadata.end_position()?)?;
    let boundaries = extract_phrase_boundaries(&piece.events)?;

    let mut cadences = extract_cadences(&piece.events)?;
    cadences.extend(piece.cadences.iter().cloned());
    let markers = build_markers(&cadences, &ctx);

    let title = piece.metadata.title();
    let chart = assemble(&ChartInput {
        regions: &regions,
        phrase_boundaries: &boundaries,
        markers: &markers.markers,
        title: &title,
        axis,
    });

    Ok(ChartBuild {
        chart,
        warnings: markers.warnings,
    })
}

/// Parse a piece document and render its chart page.
pub fn render_piece(
    source: &str,
    fallback_name: &str,
    axis: GroupingAxis,
) -> Result<(String, Vec<ChartError>), ChartError> {
    let piece = parse_piece(source, fallback_name)?;
    let build = build_chart(&piece, axis)?;
    Ok((to_plotly_html(&build.chart), build.warnings))
}
