//! # Corpus Driver
//!
//! Charts every discovered piece, one at a time: read, extract, assemble,
//! render, write. A failing piece is logged and skipped; only run-level
//! errors (no input, unwritable output, every piece failing) stop the run.

use crate::config::RunConfig;
use crate::corpus::discover;
use crate::error::ChartError;
use crate::input::{piece_name, read_piece};
use crate::render::to_plotly_html;
use crate::site::{chart_file_name, prepare_output, write_file, write_site, GANTT_DIR};
use crate::build_chart;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span, warn, Span};

/// Outcome of a corpus run with at least one chart written.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, ChartError)>,
    /// Count of non-fatal diagnostics, e.g. unrecognized cadence codes
    pub warnings: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Chart one piece file and return the written chart path plus the number
/// of warnings logged for it.
fn process_piece(path: &Path, config: &RunConfig) -> Result<(PathBuf, usize), ChartError> {
    let piece = read_piece(path)?;
    let name = piece.metadata.name.clone();
    Span::current().record("piece", name.as_str());

    debug!("Creating Gantt data for {}...", name);
    let build = build_chart(&piece, config.axis)?;
    for warning in &build.warnings {
        warn!("{}", warning);
    }

    debug!("Making and storing Gantt chart for {}...", name);
    let html = to_plotly_html(&build.chart);
    let relative = format!("{}/{}", GANTT_DIR, chart_file_name(&name));
    let out_path = write_file(&config.out_dir, &relative, &html)?;
    debug!("Stored as {:?}", out_path);

    Ok((out_path, build.warnings.len()))
}

/// Chart every piece selected by `config` and write the site files.
pub fn run(config: &RunConfig) -> Result<RunSummary, ChartError> {
    let inputs = discover(&config.inputs);
    if inputs.is_empty() {
        return Err(ChartError::NoInput);
    }
    info!("Found {} pieces", inputs.len());

    let gantt_dir = prepare_output(&config.out_dir)?;
    let mut summary = RunSummary::default();

    for path in inputs {
        let span = info_span!(
            "chart",
            file = %piece_name(&path),
            piece = tracing::field::Empty
        );
        let _enter = span.enter();

        match process_piece(&path, config) {
            Ok((out_path, warnings)) => {
                summary.warnings += warnings;
                summary.written.push(out_path);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("Skipping {:?}: {}", path, e);
                summary.failed.push((path, e));
            }
        }
    }

    if summary.written.is_empty() {
        return Err(ChartError::AllPiecesFailed {
            count: summary.failed.len(),
        });
    }

    write_site(&config.out_dir)?;
    info!(
        "Wrote {} charts ({} failed, {} warnings) to {:?}",
        summary.written.len(),
        summary.failed.len(),
        summary.warnings,
        gantt_dir
    );
    Ok(summary)
}
