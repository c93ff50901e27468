//! Batch processing and document collections.
//!
//! Batch functions run one pipeline over many files, optionally in parallel,
//! and report a result or a failure for every input in input order. A
//! failing document never stops its siblings.
//!
//! A collection is a JSON configuration naming a set of documents, a persona
//! and a job-to-be-done:
//!
//! ```json
//! {
//!   "documents": [{"filename": "guide.pdf", "title": "Guide"}],
//!   "persona": {"role": "Travel Planner"},
//!   "job_to_be_done": {"task": "Plan a trip of 4 days"}
//! }
//! ```
//!
//! All sections of all documents are ranked together; the best ones are
//! reported with their rank and a refined text excerpt.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::SectionAnalyzer;
use crate::error::{Error, Result};
use crate::model::{OutlineResult, RankedSection, SectionAnalysis};
use crate::options::AnalysisOptions;
use crate::outline::OutlineAssembler;
use crate::persona::PersonaContext;
use crate::source::{file_name, load_document};

/// Sub-directory searched first for collection documents.
const DOCUMENT_DIR: &str = "PDFs";

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub filename: String,
    pub error: String,
}

/// Result of one document in a batch.
#[derive(Debug)]
pub struct DocumentOutcome<T> {
    pub path: PathBuf,
    pub result: Result<T>,
}

impl<T> DocumentOutcome<T> {
    pub fn filename(&self) -> String {
        file_name(&self.path)
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure record, if the document failed.
    pub fn failure(&self) -> Option<DocumentFailure> {
        self.result.as_ref().err().map(|e| DocumentFailure {
            filename: self.filename(),
            error: e.to_string(),
        })
    }
}

fn run_batch<T, F, P>(
    paths: &[PathBuf],
    parallel: bool,
    process: F,
    on_done: P,
) -> Vec<DocumentOutcome<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
    P: Fn(&Path) + Sync,
{
    let run = |path: &PathBuf| {
        let result = process(path);
        if let Err(e) = &result {
            log::warn!("{}: {}", path.display(), e);
        }
        on_done(path);
        DocumentOutcome {
            path: path.clone(),
            result,
        }
    };

    if parallel {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    }
}

/// Extract the outline of every file.
pub fn extract_outlines(
    paths: &[PathBuf],
    assembler: &OutlineAssembler,
    options: &AnalysisOptions,
) -> Vec<DocumentOutcome<OutlineResult>> {
    extract_outlines_with_progress(paths, assembler, options, |_| {})
}

/// Like [`extract_outlines`], calling `on_done` as each file finishes.
pub fn extract_outlines_with_progress(
    paths: &[PathBuf],
    assembler: &OutlineAssembler,
    options: &AnalysisOptions,
    on_done: impl Fn(&Path) + Sync,
) -> Vec<DocumentOutcome<OutlineResult>> {
    let process = |path: &Path| {
        let doc = load_document(path, options.error_mode)?;
        Ok(assembler.assemble(&doc))
    };
    run_batch(paths, options.parallel, process, on_done)
}

/// Run section analysis on every file.
pub fn analyze_documents(
    paths: &[PathBuf],
    analyzer: &SectionAnalyzer,
    options: &AnalysisOptions,
) -> Vec<DocumentOutcome<SectionAnalysis>> {
    analyze_documents_with_progress(paths, analyzer, options, |_| {})
}

/// Like [`analyze_documents`], calling `on_done` as each file finishes.
pub fn analyze_documents_with_progress(
    paths: &[PathBuf],
    analyzer: &SectionAnalyzer,
    options: &AnalysisOptions,
    on_done: impl Fn(&Path) + Sync,
) -> Vec<DocumentOutcome<SectionAnalysis>> {
    let process = |path: &Path| {
        let doc = load_document(path, options.error_mode)?;
        Ok(analyzer.analyze(&doc))
    };
    run_batch(paths, options.parallel, process, on_done)
}

/// Collection configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub documents: Vec<CollectionDocument>,
    pub persona: PersonaSpec,
    pub job_to_be_done: JobSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub filename: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaSpec {
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default)]
    pub task: String,
}

/// Output of a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionOutput {
    pub metadata: CollectionMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub page_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// A collection of documents analyzed for one persona.
#[derive(Debug, Clone)]
pub struct Collection {
    config: CollectionConfig,
    base_dir: PathBuf,
}

impl Collection {
    /// Read a collection configuration; documents are resolved relative to
    /// the directory holding it.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let data = std::fs::read(config_path)?;
        let config: CollectionConfig = serde_json::from_slice(&data)?;
        let base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(config, base_dir)
    }

    pub fn new(config: CollectionConfig, base_dir: impl Into<PathBuf>) -> Result<Self> {
        if config.documents.is_empty() {
            return Err(Error::InvalidConfig("collection lists no documents".to_string()));
        }
        Ok(Self {
            config,
            base_dir: base_dir.into(),
        })
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn context(&self) -> PersonaContext {
        PersonaContext::new(&self.config.persona.role, &self.config.job_to_be_done.task)
    }

    /// Path of a collection document, preferring the `PDFs` sub-directory.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        let nested = self.base_dir.join(DOCUMENT_DIR).join(filename);
        if nested.exists() {
            nested
        } else {
            self.base_dir.join(filename)
        }
    }

    /// Analyze all documents and rank their sections together.
    pub fn run(&self, options: &AnalysisOptions) -> CollectionOutput {
        self.run_with_progress(options, |_| {})
    }

    /// Like [`Collection::run`], calling `on_done` as each document finishes.
    pub fn run_with_progress(
        &self,
        options: &AnalysisOptions,
        on_done: impl Fn(&Path) + Sync,
    ) -> CollectionOutput {
        let context = self.context();
        let analyzer = SectionAnalyzer::new(&context, options.detector.clone());
        let paths: Vec<PathBuf> = self
            .config
            .documents
            .iter()
            .map(|d| self.resolve(&d.filename))
            .collect();

        let mut input_documents = Vec::new();
        let mut failures = Vec::new();
        let mut ranked: Vec<(String, RankedSection)> = Vec::new();

        let outcomes = analyze_documents_with_progress(&paths, &analyzer, options, on_done);
        for (outcome, entry) in outcomes.into_iter().zip(&self.config.documents) {
            match outcome.result {
                Ok(analysis) => {
                    input_documents.push(entry.filename.clone());
                    ranked.extend(
                        analysis
                            .ranked_sections
                            .into_iter()
                            .map(|r| (entry.filename.clone(), r)),
                    );
                }
                Err(e) => failures.push(DocumentFailure {
                    filename: entry.filename.clone(),
                    error: e.to_string(),
                }),
            }
        }

        ranked.sort_by(|a, b| b.1.relevance_score.total_cmp(&a.1.relevance_score));
        ranked.truncate(options.max_ranked);

        let extracted_sections = ranked
            .iter()
            .enumerate()
            .map(|(i, (document, r))| ExtractedSection {
                document: document.clone(),
                section_title: r.section.title.clone(),
                importance_rank: i + 1,
                page_number: r.section.page,
            })
            .collect();
        let subsection_analysis = ranked
            .iter()
            .map(|(document, r)| SubsectionAnalysis {
                document: document.clone(),
                refined_text: r.section.content.chars().take(options.refined_text_chars).collect(),
                page_number: r.section.page,
            })
            .collect();

        log::info!(
            "Collection: {} documents analyzed, {} failed",
            input_documents.len(),
            failures.len()
        );

        CollectionOutput {
            metadata: CollectionMetadata {
                input_documents,
                persona: self.config.persona.role.clone(),
                job_to_be_done: self.config.job_to_be_done.task.clone(),
                processing_timestamp: Utc::now(),
            },
            extracted_sections,
            subsection_analysis,
            failures,
        }
    }
}
