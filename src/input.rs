//! # Piece Input
//!
//! Reads the per-piece analysis tables written by the score-parsing
//! collaborator. Each piece is one YAML document:
//!
//! ```yaml
//! piece: K279-1
//! global-key: C
//! last-mn: 100
//! events:
//!   - { mn: 1, onset: 0, timesig: 4/4, key: I, category: local, semitones: 0 }
//!   - { mn: 8, onset: 1/2, timesig: 4/4, key: V, category: applied, cadence: HC, beat: 3 }
//! cadences:
//!   - { position: 99.5, type: PAC, key: I, beat: 3 }
//! ```
//!
//! Positional fields stay unparsed here; malformed values surface as
//! `DataFormat` errors once positions are derived.

use crate::error::ChartError;
use crate::model::{CadenceRecord, HarmonicEvent, Piece, PieceMetadata, Scalar};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawPiece {
    piece: Option<String>,
    global_key: String,
    last_mn: i64,
    #[serde(default)]
    events: Vec<HarmonicEvent>,
    #[serde(default)]
    cadences: Vec<RawCadence>,
}

#[derive(Deserialize, Debug)]
struct RawCadence {
    position: Scalar,
    #[serde(rename = "type")]
    code: String,
    key: Option<String>,
    beat: Scalar,
}

/// Parse one piece document. `fallback_name` is used when the document
/// does not name the piece.
pub fn parse_piece(source: &str, fallback_name: &str) -> Result<Piece, ChartError> {
    let raw: RawPiece = serde_yaml::from_str(source).map_err(|e| ChartError::InvalidPiece {
        message: e.to_string(),
    })?;

    let cadences = raw
        .cadences
        .into_iter()
        .map(|c| {
            let position = c.position.to_f64().map_err(|e| ChartError::InvalidPiece {
                message: format!("Invalid cadence position: {}", e),
            })?;
            if !position.is_finite() {
                return Err(ChartError::InvalidPiece {
                    message: format!("Cadence position must be finite, got {}", c.position),
                });
            }
            Ok(CadenceRecord {
                position,
                code: c.code.trim().to_string(),
                key: c.key,
                beat: c.beat.to_string(),
            })
        })
        .collect::<Result<Vec<_>, ChartError>>()?;

    let name = raw
        .piece
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    Ok(Piece {
        metadata: PieceMetadata {
            name,
            global_key: raw.global_key,
            last_mn: raw.last_mn,
        },
        events: raw.events,
        cadences,
    })
}

/// Read and parse a piece file, named after the file stem by default.
pub fn read_piece(path: &Path) -> Result<Piece, ChartError> {
    let source = fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_piece(&source, &piece_name(path))
}

/// File stem of a path, used as the default piece identifier.
pub fn piece_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
