//! Header recognition rules.
//!
//! Each rule pairs a line predicate with a title extractor. Rules are kept in
//! an ordered list outside the detector; the first rule that yields an
//! acceptable title wins.

use regex::Regex;

/// One header rule: a pattern and the capture group holding the title.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    name: String,
    pattern: Regex,
    group: usize,
}

impl HeaderRule {
    /// Create a rule whose title is capture group 1 (or the whole match if
    /// the pattern has no groups).
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(pattern)?;
        let group = usize::from(pattern.captures_len() > 1);
        Ok(Self {
            name: name.into(),
            pattern,
            group,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw title text if the line matches.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }
}

/// Ordered header rules.
#[derive(Debug, Clone)]
pub struct HeaderRules {
    rules: Vec<HeaderRule>,
}

impl HeaderRules {
    pub fn new(rules: Vec<HeaderRule>) -> Self {
        Self { rules }
    }

    /// The built-in rules: all-caps lines, numbered headings, Title Case
    /// phrases ending in a colon, and "Chapter N" / "Section N" lines.
    pub fn builtin() -> Self {
        let builtin = [
            ("all_caps", r"^([A-Z][A-Z\s]{5,40})$"),
            ("numbered", r"^(\d+\.?\s+[A-Z][^.!?]*)$"),
            ("title_colon", r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*):"),
            ("chapter_section", r"^(?:Chapter|Section)\s+\d+[:\-\s]*(.+)"),
        ];
        Self::new(
            builtin
                .iter()
                .map(|(name, pattern)| {
                    HeaderRule::new(*name, pattern).expect("builtin header rule")
                })
                .collect(),
        )
    }

    /// Append a rule with the lowest priority.
    pub fn push(&mut self, rule: HeaderRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderRule> {
        self.rules.iter()
    }

    /// Find the header title of a trimmed line.
    ///
    /// Titles are trimmed and lose trailing colons; a title must be strictly
    /// between `min_len` and `max_len` characters, otherwise the next rule is
    /// tried.
    pub fn match_title(&self, line: &str, min_len: usize, max_len: usize) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            let title = rule.extract(line)?.trim().trim_end_matches(':');
            let len = title.chars().count();
            (len > min_len && len < max_len).then(|| title.to_string())
        })
    }
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self::builtin()
    }
}
