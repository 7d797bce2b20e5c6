use super::*;
use crate::cadence::{build_markers, CadenceMarker, DashStyle, LABEL_OFFSET};
use crate::fraction::Fraction;
use crate::model::{AxisValue, CadenceRecord, Category, GroupingAxis, KeyRegion, PieceContext};

fn region(start: i64, end: i64, key: &str, category: Category, axis: i64) -> KeyRegion {
    KeyRegion {
        start: Fraction::from_integer(start),
        end: Fraction::from_integer(end),
        key: key.to_string(),
        category,
        axis_value: AxisValue::Number(axis),
    }
}

fn cadence(position: f64, code: &str, beat: &str) -> CadenceRecord {
    CadenceRecord {
        position,
        code: code.to_string(),
        key: None,
        beat: beat.to_string(),
    }
}

fn sample_regions() -> Vec<KeyRegion> {
    vec![
        region(1, 9, "I", Category::Local, 0),
        region(9, 11, "V", Category::Applied, 7),
        region(11, 17, "I", Category::Local, 0),
        region(17, 21, "vi", Category::Local, 9),
        region(21, 25, "V", Category::TonicOfAdjacentApplied, 7),
    ]
}

fn markers(records: &[CadenceRecord]) -> Vec<CadenceMarker> {
    build_markers(records, &PieceContext::new("test")).markers
}

fn input<'a>(
    regions: &'a [KeyRegion],
    boundaries: &'a [Fraction],
    markers: &'a [CadenceMarker],
) -> ChartInput<'a> {
    ChartInput {
        regions,
        phrase_boundaries: boundaries,
        markers,
        title: "K279-1 (C)",
        axis: GroupingAxis::Semitones,
    }
}

#[test]
fn test_bars_grouped_by_key_label() {
    let regions = sample_regions();
    let chart = assemble(&input(&regions, &[], &[]));

    assert_eq!(chart.bar_count(), 5);
    let labels: Vec<&str> = chart.groups.iter().map(|g| g.label.as_str()).collect();
    // Highest semitone value first
    assert_eq!(labels, vec!["vi", "V", "I"]);

    let tonic = &chart.groups[2];
    assert_eq!(tonic.bars.len(), 2);
    assert_eq!((tonic.bars[0].start, tonic.bars[0].end), (1.0, 9.0));
    assert_eq!((tonic.bars[1].start, tonic.bars[1].end), (11.0, 17.0));

    let dominant = &chart.groups[1];
    assert_eq!(dominant.bars[0].color, "rgb(228,26,28)");
    assert_eq!(dominant.bars[1].color, "rgb(77,175,74)");
    assert_eq!(tonic.bars[0].color, "rgb(55,126,184)");
}

#[test]
fn test_groups_with_equal_axis_value_sorted_by_label() {
    let regions = vec![
        KeyRegion {
            axis_value: AxisValue::Text("V".to_string()),
            ..region(1, 2, "V", Category::Local, 0)
        },
        KeyRegion {
            axis_value: AxisValue::Text("V".to_string()),
            ..region(2, 3, "V/V", Category::Applied, 0)
        },
        region(3, 4, "I", Category::Local, 0),
    ];
    let chart = assemble(&input(&regions, &[], &[]));
    let labels: Vec<&str> = chart.groups.iter().map(|g| g.label.as_str()).collect();
    // Text values sort after numbers, so they come first in descending order
    assert_eq!(labels, vec!["V", "V/V", "I"]);
}

#[test]
fn test_no_decoration_without_cadences_or_phrases() {
    let regions = sample_regions();
    let chart = assemble(&input(&regions, &[], &[]));

    assert!(chart.shapes.is_empty());
    assert!(chart.annotations.is_empty());
    assert!(chart.hover.is_none());
    assert!(!chart.has_decoration());
}

#[test]
fn test_phrase_boundaries_become_dashed_black_lines() {
    let regions = sample_regions();
    let boundaries = vec![Fraction::from_integer(17), Fraction::new(17, 2).unwrap()];
    let chart = assemble(&input(&regions, &boundaries, &[]));

    assert_eq!(chart.shapes.len(), 2);
    assert_eq!(chart.shapes[0].x, 8.5);
    assert_eq!(chart.shapes[1].x, 17.0);
    for shape in &chart.shapes {
        assert_eq!(shape.kind, ShapeKind::PhraseBoundary);
        assert_eq!(shape.line.color, "rgb(0, 0, 0)");
        assert_eq!(shape.line.width, 0.2);
        assert_eq!(shape.line.dash, DashStyle::LongDash);
    }
    assert!(chart.annotations.is_empty());
    assert!(chart.hover.is_none());
}

#[test]
fn test_cadence_lines_labels_and_hover() {
    let regions = sample_regions();
    let boundaries = vec![Fraction::from_integer(9)];
    let marks = markers(&[
        cadence(8.5, "PAC", "3"),
        cadence(10.75, "HC", "4"),
        cadence(16.5, "DEC", "3"),
    ]);
    let chart = assemble(&input(&regions, &boundaries, &marks));

    // One phrase line, then three cadence lines
    assert_eq!(chart.shapes.len(), 4);
    assert_eq!(chart.shapes[0].kind, ShapeKind::PhraseBoundary);
    let cadence_lines: Vec<&LineShape> = chart
        .shapes
        .iter()
        .filter(|s| s.kind == ShapeKind::Cadence)
        .collect();
    assert_eq!(cadence_lines.len(), 3);
    assert_eq!(cadence_lines[0].line.width, 1.0);
    assert_eq!(cadence_lines[1].line.dash, DashStyle::Dash);
    assert_eq!(cadence_lines[2].line.dash, DashStyle::Dot);
    assert!(cadence_lines.iter().all(|s| s.line.color == CADENCE_LINE_COLOR));

    let texts: Vec<&str> = chart.annotations.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["PC", "HC", "DC"]);
    assert_eq!(chart.annotations[0].y, LABEL_BASE_Y);
    assert_eq!(chart.annotations[1].y, LABEL_BASE_Y + LABEL_OFFSET);
    assert_eq!(chart.annotations[2].y, LABEL_BASE_Y);
    assert!(chart.annotations.iter().all(|a| a.font_size == LABEL_FONT_SIZE));

    let hover = chart.hover.expect("hover layer");
    assert_eq!(hover.name, "Cadences");
    assert_eq!(hover.points.len(), 3);
    assert_eq!(hover.points[1].text, "Cad: HC<br>Beat: 4");
    assert_eq!(hover.points[1].y, -1.0);
}

#[test]
fn test_unrecognized_cadence_contributes_hover_only() {
    let regions = sample_regions();
    let marks = markers(&[cadence(4.0, "XYZ", "1"), cadence(8.0, "IAC", "1")]);
    let chart = assemble(&input(&regions, &[], &marks));

    assert_eq!(chart.shapes.len(), 1);
    assert_eq!(chart.shapes[0].x, 8.0);
    assert_eq!(chart.annotations.len(), 1);
    assert_eq!(chart.annotations[0].text, "IC");
    // Second marker in order, so it sits on the upper label row
    assert_eq!(chart.annotations[0].y, LABEL_BASE_Y + LABEL_OFFSET);

    let hover = chart.hover.expect("hover layer");
    assert_eq!(hover.points.len(), 2);
    assert_eq!(hover.points[0].text, "Cad: XYZ<br>Beat: 1");
}

#[test]
fn test_axes_and_title() {
    let regions = sample_regions();
    let chart = assemble(&input(&regions, &[], &[]));

    assert_eq!(chart.title, "K279-1 (C)");
    assert_eq!(chart.x_axis.title, "Measures");
    assert_eq!(chart.x_axis.kind, AxisKind::Linear);
    assert_eq!(chart.y_axis.title, "Tonicized keys");
    assert_eq!(chart.grouping_axis, GroupingAxis::Semitones);
}

#[test]
fn test_inputs_untouched_and_output_deterministic() {
    let regions = sample_regions();
    let boundaries = vec![Fraction::from_integer(9), Fraction::from_integer(21)];
    let marks = markers(&[cadence(8.5, "PAC", "3"), cadence(20.5, "HC", "3")]);

    let first = assemble(&input(&regions, &boundaries, &marks));
    let second = assemble(&input(&regions, &boundaries, &marks));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(regions, sample_regions());
}

#[test]
fn test_serialized_shape() {
    let regions = vec![region(1, 3, "I", Category::Local, 0)];
    let chart = assemble(&input(&regions, &[], &[]));
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["groups"][0]["label"], "I");
    assert_eq!(json["groups"][0]["axisValue"], 0);
    assert_eq!(json["groups"][0]["bars"][0]["category"], "local");
    assert_eq!(json["xAxis"]["kind"], "linear");
    assert_eq!(json["groupingAxis"], "semitones");
    assert!(json.get("hover").is_none());
}
