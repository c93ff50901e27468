//! Persona profiling: role and task classification, per-section insights and
//! priorities.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::PersonaContext;
use crate::model::Section;

/// Broad persona role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Researcher,
    Student,
    Analyst,
    Teacher,
    Manager,
    Entrepreneur,
    General,
}

impl RoleType {
    /// Vocabulary associated with the role.
    pub fn terms(self) -> &'static [&'static str] {
        match self {
            RoleType::Researcher => &[
                "research", "study", "analysis", "methodology", "data", "experiment",
                "hypothesis", "literature", "publication", "findings", "results", "conclusion",
            ],
            RoleType::Student => &[
                "learn", "study", "understand", "concept", "theory", "practice", "example",
                "exercise", "exam", "assignment", "knowledge", "skill",
            ],
            RoleType::Analyst => &[
                "analyze", "evaluate", "assess", "trend", "pattern", "metric", "performance",
                "comparison", "forecast", "strategy", "insight", "recommendation",
            ],
            RoleType::Teacher => &[
                "teach", "explain", "instruction", "curriculum", "lesson", "education",
                "training", "guidance", "demonstration", "assessment", "learning", "development",
            ],
            RoleType::Manager => &[
                "manage", "plan", "organize", "control", "strategy", "decision", "resource",
                "team", "process", "objective", "performance", "leadership",
            ],
            RoleType::Entrepreneur => &[
                "business", "opportunity", "market", "innovation", "startup", "venture",
                "revenue", "growth", "investment", "competition", "strategy", "scalability",
            ],
            RoleType::General => &[],
        }
    }

    /// Role words that identify a persona when no vocabulary term matches.
    fn titles(self) -> &'static [&'static str] {
        match self {
            RoleType::Researcher => &["phd", "research", "scientist", "academic"],
            RoleType::Student => &["student", "undergraduate", "graduate"],
            RoleType::Analyst => &["analyst", "investment", "business"],
            RoleType::Teacher => &["teacher", "trainer", "instructor"],
            RoleType::Manager => &["manager", "director", "executive"],
            RoleType::Entrepreneur => &["entrepreneur", "founder", "startup"],
            RoleType::General => &[],
        }
    }

    const SPECIFIC: [RoleType; 6] = [
        RoleType::Researcher,
        RoleType::Student,
        RoleType::Analyst,
        RoleType::Teacher,
        RoleType::Manager,
        RoleType::Entrepreneur,
    ];

    /// Classify a free-text role description.
    ///
    /// The role whose vocabulary occurs most often wins (earlier roles win
    /// ties); otherwise job titles are checked in the same order.
    pub fn classify(description: &str) -> Self {
        let lowered = description.to_lowercase();
        best_match(&Self::SPECIFIC, &lowered, Self::terms)
            .or_else(|| {
                Self::SPECIFIC
                    .iter()
                    .copied()
                    .find(|role| role.titles().iter().any(|t| lowered.contains(t)))
            })
            .unwrap_or(RoleType::General)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::Researcher => "researcher",
            RoleType::Student => "student",
            RoleType::Analyst => "analyst",
            RoleType::Teacher => "teacher",
            RoleType::Manager => "manager",
            RoleType::Entrepreneur => "entrepreneur",
            RoleType::General => "general",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad job-to-be-done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Review,
    Learn,
    Analyze,
    Prepare,
    Summarize,
    General,
}

impl TaskType {
    pub fn terms(self) -> &'static [&'static str] {
        match self {
            TaskType::Review => &[
                "review",
                "summary",
                "overview",
                "evaluation",
                "assessment",
                "analysis",
            ],
            TaskType::Learn => &["learn", "understand", "study", "master", "practice", "acquire"],
            TaskType::Analyze => &[
                "analyze",
                "examine",
                "investigate",
                "evaluate",
                "assess",
                "compare",
            ],
            TaskType::Prepare => &["prepare", "plan", "organize", "design", "develop", "create"],
            TaskType::Summarize => &[
                "summarize",
                "condense",
                "extract",
                "highlight",
                "synthesize",
                "distill",
            ],
            TaskType::General => &[],
        }
    }

    const SPECIFIC: [TaskType; 5] = [
        TaskType::Review,
        TaskType::Learn,
        TaskType::Analyze,
        TaskType::Prepare,
        TaskType::Summarize,
    ];

    /// Classify a free-text task description.
    pub fn classify(description: &str) -> Self {
        best_match(&Self::SPECIFIC, &description.to_lowercase(), Self::terms)
            .unwrap_or(TaskType::General)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Review => "review",
            TaskType::Learn => "learn",
            TaskType::Analyze => "analyze",
            TaskType::Prepare => "prepare",
            TaskType::Summarize => "summarize",
            TaskType::General => "general",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate with the most vocabulary terms contained in `text`; the first
/// candidate wins ties and zero matches give `None`.
fn best_match<T: Copy>(
    candidates: &[T],
    text: &str,
    terms: fn(T) -> &'static [&'static str],
) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for &candidate in candidates {
        let hits = terms(candidate).iter().filter(|t| text.contains(*t)).count();
        if hits > 0 && best.map_or(true, |(_, b)| hits > b) {
            best = Some((candidate, hits));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Section priority for the persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Persona view of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInsight {
    pub section_id: String,
    pub persona_relevance_score: f64,
    pub persona_insights: Vec<String>,
    pub key_concepts: Vec<String>,
    pub persona_priority: Priority,
    pub job_alignment_score: f64,
}

/// Aggregate persona view of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub persona_type: RoleType,
    pub job_type: TaskType,
    pub total_sections_analyzed: usize,
    pub high_priority_sections: usize,
    pub medium_priority_sections: usize,
    pub low_priority_sections: usize,
    pub average_relevance_score: f64,
    pub top_insights: Vec<String>,
}

/// Trigger words and the insight they produce.
type InsightRule = (&'static [&'static str], &'static str);

const RESEARCHER_INSIGHTS: &[InsightRule] = &[
    (&["methodology", "method", "approach"], "Research methodology identified"),
    (&["data", "dataset", "sample"], "Data sources and datasets mentioned"),
    (&["result", "finding", "conclusion"], "Research findings and results presented"),
];

const STUDENT_INSIGHTS: &[InsightRule] = &[
    (&["concept", "principle", "theory"], "Key concepts for learning identified"),
    (&["example", "illustration", "case"], "Examples and illustrations available"),
    (&["exercise", "problem", "practice"], "Practice materials and exercises found"),
];

const ANALYST_INSIGHTS: &[InsightRule] = &[
    (&["trend", "pattern", "analysis"], "Analytical insights and trends identified"),
    (&["metric", "kpi", "performance"], "Performance metrics and KPIs mentioned"),
    (&["forecast", "prediction", "projection"], "Forecasting and predictive information"),
];

const REVIEW_INSIGHTS: &[InsightRule] =
    &[(&["summary", "overview", "abstract"], "Summary content suitable for review")];

const ANALYZE_INSIGHTS: &[InsightRule] =
    &[(&["comparison", "contrast", "versus"], "Comparative analysis opportunities")];

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("word pattern"))
}

fn long_word_regex() -> &'static Regex {
    static LONG_WORD: OnceLock<Regex> = OnceLock::new();
    LONG_WORD.get_or_init(|| Regex::new(r"\b\w{4,}\b").expect("long word pattern"))
}

fn words(text: &str) -> Vec<&str> {
    word_regex().find_iter(text).map(|m| m.as_str()).collect()
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Persona classification plus the section-level analysis built on it.
#[derive(Debug, Clone)]
pub struct PersonaProfile {
    role: RoleType,
    task: TaskType,
    task_description: String,
}

impl PersonaProfile {
    pub fn new(context: &PersonaContext) -> Self {
        let role = RoleType::classify(&context.role);
        let task = TaskType::classify(&context.task);
        log::debug!("Persona classified as {} / {}", role, task);
        Self {
            role,
            task,
            task_description: context.task.to_lowercase(),
        }
    }

    pub fn role(&self) -> RoleType {
        self.role
    }

    pub fn task(&self) -> TaskType {
        self.task
    }

    /// Density of role, task and job-description words in `text`, scaled to
    /// `[0, 1]`.
    pub fn relevance(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens = words(&lowered);
        if tokens.is_empty() {
            return 0.0;
        }

        let role_terms = self.role.terms();
        let task_terms = self.task.terms();
        let job_words: HashSet<&str> = words(&self.task_description).into_iter().collect();

        let n = tokens.len() as f64;
        let role_hits = tokens.iter().filter(|t| role_terms.contains(*t)).count() as f64;
        let task_hits = tokens.iter().filter(|t| task_terms.contains(*t)).count() as f64;
        let direct_hits = tokens
            .iter()
            .filter(|t| t.chars().count() > 3 && job_words.contains(*t))
            .count() as f64;

        let combined = 0.4 * role_hits / n + 0.3 * task_hits / n + 0.3 * direct_hits / n;
        (combined * 10.0).min(1.0)
    }

    /// Share of the job description's longer words that also occur in
    /// `text`.
    pub fn job_alignment(&self, text: &str) -> f64 {
        let job: HashSet<&str> = long_word_regex()
            .find_iter(&self.task_description)
            .map(|m| m.as_str())
            .collect();
        if job.is_empty() {
            return 0.0;
        }
        let lowered = text.to_lowercase();
        let content: HashSet<&str> = long_word_regex()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();
        let common = job.intersection(&content).count();
        (common as f64 / job.len() as f64).min(1.0)
    }

    /// Observations about the content relevant to the role and task.
    pub fn insights(&self, content: &str) -> Vec<String> {
        let text = content.to_lowercase();
        let role_rules: &[InsightRule] = match self.role {
            RoleType::Researcher => RESEARCHER_INSIGHTS,
            RoleType::Student => STUDENT_INSIGHTS,
            RoleType::Analyst => ANALYST_INSIGHTS,
            _ => &[],
        };
        let task_rules: &[InsightRule] = match self.task {
            TaskType::Review => REVIEW_INSIGHTS,
            TaskType::Analyze => ANALYZE_INSIGHTS,
            _ => &[],
        };

        role_rules
            .iter()
            .chain(task_rules)
            .filter(|(needles, _)| contains_any(&text, needles))
            .map(|(_, insight)| insight.to_string())
            .collect()
    }

    /// Role vocabulary found in the content, in order of first occurrence,
    /// at most ten.
    pub fn key_concepts(&self, content: &str) -> Vec<String> {
        let lowered = content.to_lowercase();
        let terms = self.role.terms();
        let mut concepts: Vec<String> = Vec::new();
        for token in words(&lowered) {
            if concepts.len() == 10 {
                break;
            }
            if token.chars().count() > 3
                && terms.contains(&token)
                && !concepts.iter().any(|c| c == token)
            {
                concepts.push(token.to_string());
            }
        }
        concepts
    }

    /// Analyze one section.
    pub fn analyze(&self, section: &Section) -> SectionInsight {
        let scored_text = format!("{} {}", section.content, section.title);
        let relevance = self.relevance(&scored_text);
        let insights = self.insights(&section.content);
        let concepts = self.key_concepts(&section.content);
        let priority = priority(relevance, insights.len(), concepts.len());

        SectionInsight {
            section_id: section.id.clone(),
            persona_relevance_score: relevance,
            persona_insights: insights,
            key_concepts: concepts,
            persona_priority: priority,
            job_alignment_score: self.job_alignment(&scored_text),
        }
    }

    /// Summarize the analyses of a document's sections.
    pub fn summarize(&self, insights: &[SectionInsight]) -> PersonaSummary {
        let count = insights.len();
        let high = insights
            .iter()
            .filter(|i| i.persona_priority == Priority::High)
            .count();
        let medium = insights
            .iter()
            .filter(|i| i.persona_priority == Priority::Medium)
            .count();
        let mean = insights
            .iter()
            .map(|i| i.persona_relevance_score)
            .sum::<f64>()
            / count.max(1) as f64;

        PersonaSummary {
            persona_type: self.role,
            job_type: self.task,
            total_sections_analyzed: count,
            high_priority_sections: high,
            medium_priority_sections: medium,
            low_priority_sections: count - high - medium,
            average_relevance_score: (mean * 1000.0).round() / 1000.0,
            top_insights: top_insights(insights, 5),
        }
    }
}

fn priority(relevance: f64, insight_count: usize, concept_count: usize) -> Priority {
    if relevance >= 0.6 && insight_count >= 2 {
        Priority::High
    } else if relevance >= 0.3 && (insight_count >= 1 || concept_count >= 3) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Most frequent insights; ties keep first-seen order.
fn top_insights(insights: &[SectionInsight], limit: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for insight in insights.iter().flat_map(|i| i.persona_insights.iter()) {
        let count = counts.entry(insight.as_str()).or_default();
        if *count == 0 {
            order.push(insight.as_str());
        }
        *count += 1;
    }
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(limit).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetectionMethod;

    fn profile(role: &str, task: &str) -> PersonaProfile {
        PersonaProfile::new(&PersonaContext::new(role, task))
    }

    #[test]
    fn test_role_classification() {
        assert_eq!(
            RoleType::classify("PhD Researcher in Computational Biology"),
            RoleType::Researcher
        );
        assert_eq!(RoleType::classify("Financial Analyst"), RoleType::Analyst);
        assert_eq!(RoleType::classify("Undergraduate Chemistry Student"), RoleType::Student);
        assert_eq!(RoleType::classify("Startup Founder"), RoleType::Entrepreneur);
        assert_eq!(RoleType::classify("Travel Planner"), RoleType::Manager);
        assert_eq!(RoleType::classify("Chef"), RoleType::General);
    }

    #[test]
    fn test_task_classification() {
        assert_eq!(TaskType::classify("Prepare a literature review"), TaskType::Review);
        assert_eq!(TaskType::classify("Summarize key findings"), TaskType::Summarize);
        assert_eq!(TaskType::classify("Develop a study plan"), TaskType::Prepare);
        assert_eq!(TaskType::classify("Cook dinner"), TaskType::General);
    }

    #[test]
    fn test_relevance() {
        let p = profile("Researcher", "Summarize findings");
        // findings: role term and job word; summarize: task term and job word
        let score = p.relevance("findings summarize the work");
        let expected: f64 = (0.4 * 1.0 / 4.0 + 0.3 * 1.0 / 4.0 + 0.3 * 2.0 / 4.0) * 10.0;
        assert_eq!(score, expected.min(1.0));
        assert_eq!(p.relevance(""), 0.0);
        assert_eq!(p.relevance("plain words"), 0.0);
    }

    #[test]
    fn test_job_alignment() {
        let p = profile("Researcher", "Summarize the findings of an AI study");
        // job words: summarize, findings, study
        let score = p.job_alignment("Our study reports findings.");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(profile("Researcher", "do it").job_alignment("anything"), 0.0);
    }

    #[test]
    fn test_insights_and_concepts() {
        let p = profile("Researcher", "Review the literature");
        let content = "The methodology uses a public dataset. Results and conclusion follow in the summary. Research data research.";
        assert_eq!(
            p.insights(content),
            vec![
                "Research methodology identified",
                "Data sources and datasets mentioned",
                "Research findings and results presented",
                "Summary content suitable for review",
            ]
        );
        assert_eq!(
            p.key_concepts(content),
            vec!["methodology", "results", "conclusion", "research", "data"]
        );
    }

    #[test]
    fn test_priority() {
        assert_eq!(priority(0.6, 2, 0), Priority::High);
        assert_eq!(priority(0.7, 1, 0), Priority::Medium);
        assert_eq!(priority(0.3, 0, 3), Priority::Medium);
        assert_eq!(priority(0.29, 3, 5), Priority::Low);
    }

    #[test]
    fn test_summary() {
        let p = profile("Researcher", "Review the literature");
        let sections = vec![
            Section::candidate(
                "Methods",
                1,
                "methodology data results research findings",
                DetectionMethod::Header,
            ),
            Section::candidate("Other", 2, "nothing to see", DetectionMethod::Paragraph),
        ];
        let analyses: Vec<_> = sections.iter().map(|s| p.analyze(s)).collect();
        assert_eq!(analyses[0].persona_priority, Priority::High);
        assert_eq!(analyses[1].persona_priority, Priority::Low);

        let summary = p.summarize(&analyses);
        assert_eq!(summary.persona_type, RoleType::Researcher);
        assert_eq!(summary.total_sections_analyzed, 2);
        assert_eq!(summary.high_priority_sections, 1);
        assert_eq!(summary.low_priority_sections, 1);
        assert_eq!(summary.top_insights.len(), 3);
        assert_eq!(summary.top_insights[0], "Research methodology identified");
    }

    #[test]
    fn test_empty_summary() {
        let summary = profile("Student", "Learn").summarize(&[]);
        assert_eq!(summary.total_sections_analyzed, 0);
        assert_eq!(summary.average_relevance_score, 0.0);
        assert!(summary.top_insights.is_empty());
    }
}
