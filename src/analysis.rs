//! Per-document section analysis: detection, ranking and persona profile.

use chrono::Utc;

use crate::model::{Document, DocumentMetadata, SectionAnalysis};
use crate::options::DetectorOptions;
use crate::persona::{PersonaContext, PersonaProfile, PersonaRanker};
use crate::sections::{HeaderRules, SectionDetector};

/// Detects, scores and ranks the sections of documents for one persona.
#[derive(Debug, Clone)]
pub struct SectionAnalyzer {
    detector: SectionDetector,
    ranker: PersonaRanker,
    profile: PersonaProfile,
}

impl SectionAnalyzer {
    pub fn new(context: &PersonaContext, options: DetectorOptions) -> Self {
        Self::with_detector(context, SectionDetector::new(options))
    }

    /// Use custom header rules.
    pub fn with_rules(
        context: &PersonaContext,
        options: DetectorOptions,
        rules: HeaderRules,
    ) -> Self {
        Self::with_detector(context, SectionDetector::with_rules(options, rules))
    }

    fn with_detector(context: &PersonaContext, detector: SectionDetector) -> Self {
        Self {
            detector,
            ranker: PersonaRanker::new(context),
            profile: PersonaProfile::new(context),
        }
    }

    pub fn detector(&self) -> &SectionDetector {
        &self.detector
    }

    pub fn ranker(&self) -> &PersonaRanker {
        &self.ranker
    }

    pub fn profile(&self) -> &PersonaProfile {
        &self.profile
    }

    /// Analyze one document.
    pub fn analyze(&self, doc: &Document) -> SectionAnalysis {
        let sections = self.detector.detect(&doc.name, &doc.pages);
        let ranked_sections = self.ranker.rank(&sections);
        let insights: Vec<_> = sections.iter().map(|s| self.profile.analyze(s)).collect();
        let summary = self.profile.summarize(&insights);

        SectionAnalysis {
            metadata: DocumentMetadata {
                filename: doc.name.clone(),
                total_pages: doc.page_count(),
                total_characters: doc.char_count(),
                total_sections: sections.len(),
                processing_timestamp: Utc::now(),
            },
            sections,
            ranked_sections,
            insights,
            persona_analysis: Some(summary),
        }
    }
}
