use std::collections::HashMap;

use crate::model::{round_points, Span};

/// Body size assumed for documents without any spans.
pub const DEFAULT_BODY_SIZE: i32 = 10;

/// Font size statistics for a document.
#[derive(Debug, Clone)]
pub struct FontStatistics {
    /// Body text font size (most common rounded size)
    pub body_size: i32,
    /// All observed rounded font sizes with frequency
    pub size_histogram: HashMap<i32, usize>,
}

impl Default for FontStatistics {
    fn default() -> Self {
        Self {
            body_size: DEFAULT_BODY_SIZE,
            size_histogram: HashMap::new(),
        }
    }
}

impl FontStatistics {
    /// Collect statistics from every span of a document.
    pub fn from_spans<'a>(spans: impl IntoIterator<Item = &'a Span>) -> Self {
        let mut stats = Self::default();
        for span in spans {
            *stats.size_histogram.entry(span.rounded_size()).or_insert(0) += 1;
        }
        stats.analyze();
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        *self.size_histogram.entry(round_points(size)).or_insert(0) += 1;
    }

    /// Recompute the body size from the histogram.
    ///
    /// Among equally frequent sizes the smallest one wins.
    pub fn analyze(&mut self) {
        self.body_size = self
            .size_histogram
            .iter()
            .max_by(|(size_a, count_a), (size_b, count_b)| {
                count_a.cmp(count_b).then_with(|| size_b.cmp(size_a))
            })
            .map(|(size, _)| *size)
            .unwrap_or(DEFAULT_BODY_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_statistics() {
        let mut stats = FontStatistics::default();
        for _ in 0..100 {
            stats.add_size(12.0);
        }
        for _ in 0..5 {
            stats.add_size(18.0);
        }
        for _ in 0..3 {
            stats.add_size(24.0);
        }
        stats.analyze();

        assert_eq!(stats.body_size, 12);
        assert_eq!(stats.size_histogram.get(&18), Some(&5));
    }

    #[test]
    fn test_rounding_groups_sizes() {
        let spans = vec![
            Span::new("a", 9.6, false, 0.0, 0.0),
            Span::new("b", 10.4, false, 0.0, 0.0),
            Span::new("c", 14.0, false, 0.0, 0.0),
        ];
        let stats = FontStatistics::from_spans(&spans);
        assert_eq!(stats.body_size, 10);
    }

    #[test]
    fn test_half_point_body_size_rounds_to_even() {
        let mut spans: Vec<Span> = (0..5)
            .map(|i| Span::new("body", 10.5, false, 0.0, i as f32 * 12.0))
            .collect();
        spans.push(Span::new("Heading", 11.0, true, 0.0, 80.0));
        let stats = FontStatistics::from_spans(&spans);
        assert_eq!(stats.body_size, 10);
        assert_eq!(stats.size_histogram.get(&11), Some(&1));

        let mut added = FontStatistics::default();
        added.add_size(12.5);
        added.analyze();
        assert_eq!(added.body_size, 12);
    }

    #[test]
    fn test_tie_prefers_smaller_size() {
        let spans = vec![
            Span::new("a", 14.0, false, 0.0, 0.0),
            Span::new("b", 11.0, false, 0.0, 0.0),
        ];
        let stats = FontStatistics::from_spans(&spans);
        assert_eq!(stats.body_size, 11);
    }

    #[test]
    fn test_empty_fallback() {
        let stats = FontStatistics::from_spans(&Vec::<Span>::new());
        assert_eq!(stats.body_size, DEFAULT_BODY_SIZE);
    }
}
