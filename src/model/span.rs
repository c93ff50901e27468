//! Span and line types.

use serde::{Deserialize, Serialize};

/// Style flag bit marking a bold span.
pub const BOLD_FLAG: u32 = 1 << 4;

/// Round a coordinate or size to whole points, ties to even.
pub fn round_points(value: f32) -> i32 {
    value.round_ties_even() as i32
}

/// A contiguous run of text sharing one font and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the span is set in a bold face
    pub bold: bool,
    /// X position (left edge)
    pub x: f32,
    /// Y position (top-down, top of the glyph box)
    pub y: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32, bold: bool, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold,
            x,
            y,
        }
    }

    /// Create a span from style flags and a bounding box `[x0, y0, x1, y1]`.
    pub fn with_flags(text: impl Into<String>, font_size: f32, flags: u32, bbox: [f32; 4]) -> Self {
        Self::new(text, font_size, flags & BOLD_FLAG != 0, bbox[0], bbox[1])
    }

    /// Font size rounded to the nearest point.
    pub fn rounded_size(&self) -> i32 {
        round_points(self.font_size)
    }
}

/// A logical text line: all spans of a page sharing one rounded baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Merged text of the line
    pub text: String,
    /// Font size of the leftmost span
    pub size: f32,
    /// Bold flag of the leftmost span
    pub bold: bool,
    /// Rounded baseline
    pub y_pos: i32,
    /// Page number (1-indexed)
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_with_flags() {
        let span = Span::with_flags("Heading", 14.0, BOLD_FLAG | 1, [72.0, 90.5, 200.0, 104.0]);
        assert!(span.bold);
        assert_eq!(span.x, 72.0);
        assert_eq!(span.y, 90.5);

        let span = Span::with_flags("body", 10.0, 4, [0.0; 4]);
        assert!(!span.bold);
    }

    #[test]
    fn test_rounded_size() {
        assert_eq!(Span::new("a", 11.6, false, 0.0, 0.0).rounded_size(), 12);
        assert_eq!(Span::new("a", 9.4, false, 0.0, 0.0).rounded_size(), 9);
        assert_eq!(Span::new("a", 10.5, false, 0.0, 0.0).rounded_size(), 10);
        assert_eq!(Span::new("a", 11.5, false, 0.0, 0.0).rounded_size(), 12);
    }

    #[test]
    fn test_round_points_ties_to_even() {
        assert_eq!(round_points(100.5), 100);
        assert_eq!(round_points(101.5), 102);
        assert_eq!(round_points(101.4), 101);
        assert_eq!(round_points(-0.5), 0);
    }
}
