use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{round_points, Line, Span};

/// Group the spans of one page into logical lines.
///
/// Spans sharing a rounded baseline form one line; within a line spans are
/// ordered left to right and their trimmed texts joined with single spaces.
/// Size and bold flag come from the leftmost span. Lines are returned top to
/// bottom; lines without text are dropped.
pub fn reconstruct_lines(spans: &[Span], page: u32) -> Vec<Line> {
    let mut by_baseline: BTreeMap<i32, Vec<&Span>> = BTreeMap::new();
    for span in spans {
        by_baseline.entry(round_points(span.y)).or_default().push(span);
    }

    let mut lines = Vec::with_capacity(by_baseline.len());
    for (baseline, mut line_spans) in by_baseline {
        line_spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

        let text = line_spans
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            continue;
        }

        let leftmost = line_spans[0];
        lines.push(Line {
            text,
            size: leftmost.font_size,
            bold: leftmost.bold,
            y_pos: baseline,
            page,
        });
    }

    lines
}

/// Render reconstructed lines as plain page text.
///
/// Lines are separated by newlines; a blank line is inserted where the
/// vertical gap exceeds 1.5 times the average line spacing or the font size
/// changes by more than a point.
pub fn lines_to_text(lines: &[Line]) -> String {
    let avg_spacing = average_spacing(lines);
    let mut text = String::new();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            let prev = &lines[i - 1];
            let spacing = (line.y_pos - prev.y_pos) as f32;
            text.push('\n');
            if spacing > avg_spacing * 1.5 || (line.size - prev.size).abs() > 1.0 {
                text.push('\n');
            }
        }
        text.push_str(&line.text);
    }

    text
}

fn average_spacing(lines: &[Line]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[1].y_pos - w[0].y_pos) as f32)
        .filter(|s| *s > 0.0)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}
