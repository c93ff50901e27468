//! Integration tests for section detection and persona ranking.

use docintel::sections::SectionScorer;
use docintel::{
    DetectionMethod, DetectorOptions, Document, HeaderRule, HeaderRules, Page, PersonaContext,
    PersonaRanker, Section, SectionAnalyzer, SectionDetector,
};

const INTRODUCTION_PAGE: &str = "INTRODUCTION\n\
This report examines regional water use over ten years.\n\
It draws on survey data.\n\
\n\
The second paragraph describes the methods used in detail.";

fn scored(title: &str, content: &str, position: usize) -> Section {
    let mut section = Section::candidate(title, 1, content, DetectionMethod::Paragraph);
    section.position = position;
    section
}

#[test]
fn test_introduction_header_section() {
    let pages = vec![Page::new(1).with_text(INTRODUCTION_PAGE)];
    let sections = SectionDetector::default().detect("water", &pages);

    let intro: Vec<&Section> = sections
        .iter()
        .filter(|s| s.title == "INTRODUCTION")
        .collect();
    assert_eq!(intro.len(), 1);
    assert_eq!(intro[0].detection_method, DetectionMethod::Header);
    assert_eq!(
        intro[0].content,
        "This report examines regional water use over ten years. It draws on survey data. \
         The second paragraph describes the methods used in detail."
    );
    assert_eq!(intro[0].id, "water_section_1");
    assert_eq!(intro[0].position, 0);
    assert_eq!(intro[0].page, 1);

    // Paragraph candidates survive alongside the header section
    assert!(sections.len() > 1);
    assert!(sections[1..]
        .iter()
        .all(|s| s.detection_method == DetectionMethod::Paragraph));
}

#[test]
fn test_section_titles_unique_and_confidence_bounded() {
    let pages = vec![
        Page::new(1).with_text(INTRODUCTION_PAGE),
        Page::new(2).with_text(INTRODUCTION_PAGE),
    ];
    let sections = SectionDetector::default().detect("water", &pages);

    let mut titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    let total = titles.len();
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), total);

    for (i, section) in sections.iter().enumerate() {
        assert_eq!(section.position, i);
        assert_eq!(section.id, format!("water_section_{}", i + 1));
        assert!((0.0..=1.0).contains(&section.confidence));
    }
    // First occurrence wins
    let intro = sections.iter().find(|s| s.title == "INTRODUCTION").unwrap();
    assert_eq!(intro.page, 1);
}

#[test]
fn test_scorer_idempotent_on_detected_sections() {
    let pages = vec![Page::new(1).with_text(INTRODUCTION_PAGE)];
    let sections = SectionDetector::default().detect("water", &pages);
    let again = SectionScorer::default().score("water", sections.clone());
    assert_eq!(again, sections);
}

#[test]
fn test_list_section() {
    let text = "Packing list\n\
- hiking boots and two pairs of socks\n\
- a waterproof jacket\n\
continued with a warm hat";
    let sections = SectionDetector::default().detect("trip", &[Page::new(1).with_text(text)]);

    let list = sections
        .iter()
        .find(|s| s.detection_method == DetectionMethod::List)
        .unwrap();
    assert_eq!(list.title, "- hiking boots and two pairs of socks");
    assert_eq!(
        list.content,
        "- hiking boots and two pairs of socks\n- a waterproof jacket continued with a warm hat"
    );
}

#[test]
fn test_custom_header_rule() {
    let mut rules = HeaderRules::builtin();
    rules.push(HeaderRule::new("appendix", r"^Appendix\s+[A-Z]\s*[:.]?\s*(.+)").unwrap());
    let detector = SectionDetector::with_rules(DetectorOptions::default(), rules);

    let text = "Appendix B: Raw survey tables\nRows list each household by district.";
    let sections = detector.detect("annex", &[Page::new(3).with_text(text)]);
    let header = sections
        .iter()
        .find(|s| s.detection_method == DetectionMethod::Header)
        .unwrap();
    assert_eq!(header.title, "Raw survey tables");
    assert_eq!(header.page, 3);
}

#[test]
fn test_keyword_rich_section_ranks_first() {
    let context = PersonaContext::new("Researcher", "Summarize findings");
    let ranker = PersonaRanker::new(&context);

    let unrelated = scored(
        "River",
        "the river flows north through the valley and past the old mill before it reaches the sea near the town",
        0,
    );
    let relevant = scored(
        "Results",
        "the findings show that the findings hold across sites and the findings were consistent in every region we studied closely",
        1,
    );

    let ranked = ranker.rank(&[unrelated, relevant]);
    assert_eq!(ranked[0].section.title, "Results");
    assert!(ranked[0].relevance_score > ranked[1].relevance_score);
}

#[test]
fn test_ranking_bounds_and_stability() {
    let ranker = PersonaRanker::new(&PersonaContext::new("Student", "learn chemistry"));
    let body = "plain words without any of the persona terms at all here";
    let sections = vec![
        scored("First", body, 0),
        scored("Second", body, 1),
        scored("Third", "chemistry chemistry learn", 2),
        scored("Empty", "   ", 2),
        scored("Fourth", body, 2),
    ];

    let ranked = ranker.rank(&sections);
    assert_eq!(ranked.len(), sections.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
    assert!(ranked
        .iter()
        .all(|r| (0.0..=1.0).contains(&r.relevance_score)));

    let tied: Vec<&str> = ranked
        .iter()
        .filter(|r| r.section.content == body)
        .map(|r| r.section.title.as_str())
        .collect();
    assert_eq!(tied, vec!["First", "Second", "Fourth"]);

    let empty = ranked.iter().find(|r| r.section.title == "Empty").unwrap();
    assert_eq!(empty.relevance_score, 0.0);
}

#[test]
fn test_blank_persona_is_neutral() {
    let ranker = PersonaRanker::new(&PersonaContext::default());
    assert!(ranker.keywords().is_empty());
    let a = ranker.relevance(&scored("A", "alpha beta gamma", 0));
    let b = ranker.relevance(&scored("B", "delta epsilon zeta", 0));
    assert_eq!(a, b);
}

#[test]
fn test_analysis_serializes_expected_fields() {
    let doc = Document::new("water.pdf", vec![Page::new(1).with_text(INTRODUCTION_PAGE)]);
    let context = PersonaContext::new("Policy Analyst", "Review water use");
    let analysis = SectionAnalyzer::new(&context, DetectorOptions::default()).analyze(&doc);

    let json = serde_json::to_value(&analysis).unwrap();
    let section = &json["sections"][0];
    assert_eq!(section["section_id"], "water.pdf_section_1");
    assert_eq!(section["section_title"], "INTRODUCTION");
    assert_eq!(section["page_number"], 1);
    assert_eq!(section["detection_method"], "header");
    assert!(section["confidence_score"].is_number());
    assert!(json["ranked_sections"][0]["relevance_score"].is_number());
    assert_eq!(json["metadata"]["filename"], "water.pdf");
}
