//! # docintel
//!
//! Document structure extraction and persona-driven section ranking for PDFs.
//!
//! Two pipelines share one document model:
//!
//! - **Outline**: spans are grouped into lines, each line is turned into a
//!   feature vector, and a heading classifier labels it. The result is the
//!   document title plus an ordered H1..H4 outline.
//! - **Sections**: plain page text is split into sections by several
//!   detection strategies, deduplicated, scored, and ranked against a
//!   persona role and job-to-be-done.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docintel::{extract_outline, render};
//!
//! fn main() -> docintel::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", render::outline_to_markdown(&outline));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pluggable classifiers**: decision-forest model or scoring heuristic
//! - **Configurable header rules** for section detection
//! - **Persona profiling**: role/task classification, insights, priorities
//! - **Batch and collection processing** with Rayon

pub mod analysis;
pub mod classify;
pub mod collection;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod outline;
pub mod persona;
pub mod render;
pub mod sections;
pub mod source;

// Re-export commonly used types
pub use analysis::SectionAnalyzer;
pub use classify::{load_classifier, ForestClassifier, HeadingClassifier, HeuristicClassifier};
pub use collection::{Collection, CollectionOutput, DocumentFailure, DocumentOutcome};
pub use detect::{detect_source_kind, detect_source_kind_from_bytes, is_pdf_bytes, SourceKind};
pub use error::{Error, Result};
pub use layout::FeatureVector;
pub use model::{
    DetectionMethod, Document, HeadingLevel, Label, Line, OutlineEntry, OutlineResult, Page,
    RankedSection, Section, SectionAnalysis, Span,
};
pub use options::{AnalysisOptions, DetectorOptions, ErrorMode};
pub use outline::OutlineAssembler;
pub use persona::{PersonaContext, PersonaRanker};
pub use render::JsonFormat;
pub use sections::{HeaderRule, HeaderRules, SectionDetector};
pub use source::{load_document, PdfSource, SpanDump};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extract the title and outline of a PDF or span dump with the heuristic
/// classifier.
///
/// # Example
///
/// ```no_run
/// let outline = docintel::extract_outline("report.pdf").unwrap();
/// println!("{}", outline.title);
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    DocIntel::new().outline(path)
}

/// Detect and rank the sections of a document for a persona.
pub fn analyze_sections<P: AsRef<Path>>(
    path: P,
    role: &str,
    task: &str,
) -> Result<SectionAnalysis> {
    DocIntel::new().with_persona(role, task).analyze(path)
}

/// Builder for configuring and running the analysis pipelines.
///
/// # Example
///
/// ```no_run
/// use docintel::DocIntel;
///
/// let analysis = DocIntel::new()
///     .lenient()
///     .with_persona("Investment Analyst", "Compare revenue trends")
///     .analyze("annual_report.pdf")?;
/// # Ok::<(), docintel::Error>(())
/// ```
pub struct DocIntel {
    options: AnalysisOptions,
    classifier: Arc<dyn HeadingClassifier>,
    context: PersonaContext,
}

impl DocIntel {
    /// Create a builder with the heuristic classifier and an empty persona.
    pub fn new() -> Self {
        Self {
            options: AnalysisOptions::default(),
            classifier: Arc::new(HeuristicClassifier::new()),
            context: PersonaContext::default(),
        }
    }

    /// Enable lenient loading mode.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Use the forest model at `path`, falling back to the heuristic if it
    /// cannot be loaded.
    pub fn with_model(mut self, path: impl AsRef<Path>) -> Self {
        self.classifier = load_classifier(Some(path.as_ref()));
        self
    }

    /// Use a specific heading classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn HeadingClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the persona role and job-to-be-done.
    pub fn with_persona(mut self, role: impl Into<String>, task: impl Into<String>) -> Self {
        self.context = PersonaContext::new(role, task);
        self
    }

    /// Set analysis options.
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn assembler(&self) -> OutlineAssembler {
        OutlineAssembler::new(Arc::clone(&self.classifier))
    }

    pub fn analyzer(&self) -> SectionAnalyzer {
        SectionAnalyzer::new(&self.context, self.options.detector.clone())
    }

    /// Extract the outline of one document.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let doc = load_document(path, self.options.error_mode)?;
        Ok(self.assembler().assemble(&doc))
    }

    /// Analyze the sections of one document.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<SectionAnalysis> {
        let doc = load_document(path, self.options.error_mode)?;
        Ok(self.analyzer().analyze(&doc))
    }

    /// Extract outlines of many documents.
    pub fn outline_batch(&self, paths: &[PathBuf]) -> Vec<DocumentOutcome<OutlineResult>> {
        collection::extract_outlines(paths, &self.assembler(), &self.options)
    }

    /// Analyze many documents.
    pub fn analyze_batch(&self, paths: &[PathBuf]) -> Vec<DocumentOutcome<SectionAnalysis>> {
        collection::analyze_documents(paths, &self.analyzer(), &self.options)
    }

    /// Extract outlines of many documents, calling `on_done` per document.
    pub fn outline_batch_with_progress(
        &self,
        paths: &[PathBuf],
        on_done: impl Fn(&Path) + Sync,
    ) -> Vec<DocumentOutcome<OutlineResult>> {
        collection::extract_outlines_with_progress(paths, &self.assembler(), &self.options, on_done)
    }

    /// Analyze many documents, calling `on_done` per document.
    pub fn analyze_batch_with_progress(
        &self,
        paths: &[PathBuf],
        on_done: impl Fn(&Path) + Sync,
    ) -> Vec<DocumentOutcome<SectionAnalysis>> {
        collection::analyze_documents_with_progress(paths, &self.analyzer(), &self.options, on_done)
    }
}

impl Default for DocIntel {
    fn default() -> Self {
        Self::new()
    }
}
