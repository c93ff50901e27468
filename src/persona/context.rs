use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The persona role and job-to-be-done that sections are ranked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaContext {
    pub role: String,
    pub task: String,
}

impl PersonaContext {
    pub fn new(role: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            task: task.into(),
        }
    }

    /// Lowercase whitespace tokens of role and task longer than two
    /// characters.
    pub fn keywords(&self) -> BTreeSet<String> {
        format!("{} {}", self.role, self.task)
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.chars().count() > 2)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let context =
            PersonaContext::new("PhD Researcher", "Summarize the key findings of an AI study");
        let keywords: Vec<_> = context.keywords().into_iter().collect();
        assert_eq!(
            keywords,
            vec!["findings", "key", "phd", "researcher", "study", "summarize", "the"]
        );
    }

    #[test]
    fn test_blank_context() {
        let context = PersonaContext::default();
        assert!(context.keywords().is_empty());
        // Only short words
        assert!(PersonaContext::new("an", "of it").keywords().is_empty());
    }
}
