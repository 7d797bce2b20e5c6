//! # Chart Assembler
//!
//! Composes the derived data of one piece into a renderer-agnostic
//! [`ChartSpec`].
//!
//! ## Sub-modules
//! - `types` - ChartSpec, BarGroup, LineShape, Annotation, HoverLayer
//! - `engine` - The assembly steps and fixed decoration styles
//!
//! ## Assembly Steps
//! 1. One bar per key region, grouped by key label, colored by category
//! 2. A thin long-dashed black line per phrase boundary
//! 3. A line and a label per recognized cadence, labels staggered on two rows
//! 4. An invisible point layer carrying every cadence's hover text
//! 5. Axis titles "Measures" (linear) and "Tonicized keys"
//! 6. The piece title, including its global key
//!
//! Empty phrase or cadence inputs simply leave the matching decoration out.
//!
//! ## Example
//! ```rust
//! use modplan::chart::{assemble, ChartInput};
//! use modplan::{extract_key_regions, Category, Fraction, GroupingAxis, HarmonicEvent};
//!
//! let events = vec![HarmonicEvent::new(1, "0", "3/4", "I", Category::Local)];
//! let regions = extract_key_regions(&events, GroupingAxis::Semitones, Fraction::from_integer(9))?;
//! let chart = assemble(&ChartInput {
//!     regions: &regions,
//!     phrase_boundaries: &[],
//!     markers: &[],
//!     title: "Minuet (G)",
//!     axis: GroupingAxis::Semitones,
//! });
//!
//! assert_eq!(chart.bar_count(), 1);
//! assert!(!chart.has_decoration());
//! # Ok::<(), modplan::ChartError>(())
//! ```

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{
    assemble, ChartInput, CADENCE_LINE_COLOR, HOVER_LAYER_NAME, LABEL_BASE_Y, LABEL_FONT_SIZE,
    PHRASE_LINE,
};
pub use types::{
    Annotation, Axis, AxisKind, Bar, BarGroup, ChartSpec, HoverLayer, HoverPoint, LineShape,
    LineStyle, ShapeKind,
};
