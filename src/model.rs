//! # Analysis Data Model
//!
//! Typed records for one piece's harmonic analysis, as handed over by the
//! score-parsing collaborator, plus the entities derived from them.
//!
//! ## Type Hierarchy
//! ```text
//! Piece
//!   ├── PieceMetadata (name, global key, last measure number)
//!   ├── Vec<HarmonicEvent>   (input rows, score order)
//!   │     ├── mn, onset, timesig   -> fractional position (memoized)
//!   │     ├── key, category        -> KeyRegion grouping
//!   │     ├── semitones/fifths/numeral -> AxisValue
//!   │     ├── phraseend            -> phrase boundary
//!   │     └── cadence, beat        -> CadenceRecord
//!   └── Vec<CadenceRecord>   (explicit cadence list)
//!
//! KeyRegion     { start, end, key, category, axis_value }   (derived)
//! CadenceRecord { position, code, key, beat }
//! ```
//!
//! ## Positions
//! Onsets and time signatures are fractions of a whole note. The position of
//! an event is `mn + onset / timesig`, so measure 5, onset 1/4 in 4/4 sits at
//! exactly 5.25.
//!
//! ## Related Modules
//! - `input` - Deserializes a `Piece` from YAML
//! - `regions` - Derives positions, phrase boundaries and key regions
//! - `cadence` - Turns `CadenceRecord`s into chart markers

use crate::error::ChartError;
use crate::fraction::Fraction;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;

/// Harmonic function of a key region, which decides its bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Applied,
    Local,
    #[serde(alias = "tonic of adjacent applied chord(s)")]
    TonicOfAdjacentApplied,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Applied,
        Category::Local,
        Category::TonicOfAdjacentApplied,
    ];

    /// Fill color of bars in this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Applied => "rgb(228,26,28)",
            Category::Local => "rgb(55,126,184)",
            Category::TonicOfAdjacentApplied => "rgb(77,175,74)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Applied => "applied",
            Category::Local => "local",
            Category::TonicOfAdjacentApplied => "tonic-of-adjacent-applied",
        }
    }
}

/// Units used to order key regions on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingAxis {
    #[default]
    Semitones,
    Fifths,
    Numeral,
}

/// The grouping-axis value attached to a region. Numbers sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(i64),
    Text(String),
}

/// A YAML scalar that may be written as an integer, a float or a string
/// such as `"3/4"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Int(0)
    }
}

impl Scalar {
    /// Exact value. Floats are rejected since they are already approximations.
    pub fn to_fraction(&self) -> Result<Fraction, String> {
        match self {
            Scalar::Int(n) => Ok(Fraction::from_integer(*n)),
            Scalar::Float(x) => Err(format!("Expected an exact fraction, got {}", x)),
            Scalar::Text(s) => s.parse(),
        }
    }

    /// Approximate value, accepting any of the three notations.
    pub fn to_f64(&self) -> Result<f64, String> {
        match self {
            Scalar::Int(n) => Ok(*n as f64),
            Scalar::Float(x) => Ok(*x),
            Scalar::Text(s) => match s.parse::<Fraction>() {
                Ok(f) => Ok(f.to_f64()),
                Err(_) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid number: {}", s)),
            },
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Phrase-end marker: either a flag or the collaborator's marker symbol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PhraseEnd {
    Flag(bool),
    Marker(String),
}

impl PhraseEnd {
    pub fn is_set(&self) -> bool {
        match self {
            PhraseEnd::Flag(flag) => *flag,
            PhraseEnd::Marker(marker) => !marker.trim().is_empty(),
        }
    }
}

/// One labeled harmonic event (an input row).
#[derive(Debug, Clone, Deserialize)]
pub struct HarmonicEvent {
    /// Measure number
    pub mn: i64,
    /// Onset within the measure, as a fraction of a whole note
    #[serde(default)]
    pub onset: Scalar,
    /// Time signature, e.g. `"6/8"`. Parsed when the position is derived.
    pub timesig: Scalar,
    /// Resolved key label
    pub key: String,
    pub category: Category,
    #[serde(default)]
    pub semitones: Option<i64>,
    #[serde(default)]
    pub fifths: Option<i64>,
    #[serde(default)]
    pub numeral: Option<String>,
    #[serde(default)]
    pub phraseend: Option<PhraseEnd>,
    /// Raw cadence-type code, if a cadence is annotated at this event
    #[serde(default)]
    pub cadence: Option<String>,
    #[serde(default)]
    pub beat: Option<Scalar>,
    #[serde(skip)]
    pub(crate) position: OnceCell<Fraction>,
}

impl HarmonicEvent {
    pub fn new(mn: i64, onset: &str, timesig: &str, key: &str, category: Category) -> Self {
        Self {
            mn,
            onset: Scalar::Text(onset.to_string()),
            timesig: Scalar::Text(timesig.to_string()),
            key: key.to_string(),
            category,
            semitones: None,
            fifths: None,
            numeral: None,
            phraseend: None,
            cadence: None,
            beat: None,
            position: OnceCell::new(),
        }
    }

    pub fn with_phrase_end(mut self) -> Self {
        self.phraseend = Some(PhraseEnd::Flag(true));
        self
    }

    pub fn with_cadence(mut self, code: &str) -> Self {
        self.cadence = Some(code.to_string());
        self
    }

    pub fn with_axis_values(mut self, semitones: i64, fifths: i64, numeral: &str) -> Self {
        self.semitones = Some(semitones);
        self.fifths = Some(fifths);
        self.numeral = Some(numeral.to_string());
        self
    }

    pub fn is_phrase_end(&self) -> bool {
        self.phraseend.as_ref().is_some_and(PhraseEnd::is_set)
    }

    /// Value of the chosen grouping axis, falling back to the key label.
    pub fn axis_value(&self, axis: GroupingAxis) -> AxisValue {
        let value = match axis {
            GroupingAxis::Semitones => self.semitones.map(AxisValue::Number),
            GroupingAxis::Fifths => self.fifths.map(AxisValue::Number),
            GroupingAxis::Numeral => self.numeral.clone().map(AxisValue::Text),
        };
        value.unwrap_or_else(|| AxisValue::Text(self.key.clone()))
    }
}

/// A contiguous span in which one key is in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRegion {
    pub start: Fraction,
    pub end: Fraction,
    pub key: String,
    pub category: Category,
    pub axis_value: AxisValue,
}

/// A raw cadence annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct CadenceRecord {
    /// Fractional measure position
    pub position: f64,
    /// Cadence-type code as annotated (`PAC`, `HC`, ...)
    pub code: String,
    pub key: Option<String>,
    pub beat: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieceMetadata {
    pub name: String,
    pub global_key: String,
    pub last_mn: i64,
}

impl PieceMetadata {
    /// Chart title, e.g. `"K279-1 (C)"`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.global_key)
    }

    /// End of the final measure, where the last key region stops.
    pub fn end_position(&self) -> Result<Fraction, ChartError> {
        self.last_mn
            .checked_add(1)
            .map(Fraction::from_integer)
            .ok_or_else(|| ChartError::DataFormat {
                measure: self.last_mn,
                message: "Last measure number is out of range".to_string(),
            })
    }
}

/// Everything known about one piece before chart assembly.
#[derive(Debug, Clone)]
pub struct Piece {
    pub metadata: PieceMetadata,
    pub events: Vec<HarmonicEvent>,
    pub cadences: Vec<CadenceRecord>,
}

/// Per-piece context handed explicitly into the core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceContext {
    pub piece: String,
}

impl PieceContext {
    pub fn new(piece: impl Into<String>) -> Self {
        Self {
            piece: piece.into(),
        }
    }
}
