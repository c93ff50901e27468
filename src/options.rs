//! Analysis options and configuration.

/// Limits used by section detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Minimum characters of a paragraph or list section
    pub min_section_length: usize,

    /// Maximum characters of a paragraph section and of gathered header content
    pub max_section_length: usize,

    /// Sections kept per document after deduplication
    pub max_sections: usize,

    /// Lines looked at after a list item
    pub max_lookahead_lines: usize,

    /// Generated titles longer than this are cut and marked with "..."
    pub title_max_chars: usize,

    /// Shorter lines are never tested as headers
    pub min_header_line: usize,
}

impl DetectorOptions {
    /// Create new detector options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum section length.
    pub fn with_min_section_length(mut self, chars: usize) -> Self {
        self.min_section_length = chars;
        self
    }

    /// Set maximum section length.
    pub fn with_max_section_length(mut self, chars: usize) -> Self {
        self.max_section_length = chars;
        self
    }

    /// Set the number of sections kept per document.
    pub fn with_max_sections(mut self, count: usize) -> Self {
        self.max_sections = count;
        self
    }

    /// Set list lookahead.
    pub fn with_max_lookahead_lines(mut self, lines: usize) -> Self {
        self.max_lookahead_lines = lines;
        self
    }

    /// Set generated title length.
    pub fn with_title_max_chars(mut self, chars: usize) -> Self {
        self.title_max_chars = chars;
        self
    }

    /// Set the minimum trimmed length of a header line.
    pub fn with_min_header_line(mut self, chars: usize) -> Self {
        self.min_header_line = chars;
        self
    }
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            min_section_length: 30,
            max_section_length: 2000,
            max_sections: 50,
            max_lookahead_lines: 5,
            title_max_chars: 50,
            min_header_line: 5,
        }
    }
}

/// Options for loading and analyzing documents.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to process documents in parallel
    pub parallel: bool,

    /// Section detection limits
    pub detector: DetectorOptions,

    /// Ranked sections reported by a collection run
    pub max_ranked: usize,

    /// Characters of section content kept as refined text
    pub refined_text_chars: usize,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (unreadable pages are left empty).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set section detection options.
    pub fn with_detector(mut self, detector: DetectorOptions) -> Self {
        self.detector = detector;
        self
    }

    /// Set the number of ranked sections to report.
    pub fn with_max_ranked(mut self, count: usize) -> Self {
        self.max_ranked = count;
        self
    }

    /// Set refined text length.
    pub fn with_refined_text_chars(mut self, chars: usize) -> Self {
        self.refined_text_chars = chars;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
            detector: DetectorOptions::default(),
            max_ranked: 10,
            refined_text_chars: 300,
        }
    }
}

/// Error handling mode while loading documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Leave unreadable pages empty and continue
    Lenient,
}
