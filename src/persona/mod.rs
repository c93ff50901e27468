//! Persona-driven relevance.
//!
//! [`PersonaRanker`] orders a document's sections by how well they fit a
//! persona role and job-to-be-done. [`PersonaProfile`] adds a coarser,
//! vocabulary-based view: the persona type, per-section insights and a
//! priority for each section.

mod context;
pub mod profile;
mod ranker;

pub use context::PersonaContext;
pub use profile::{PersonaProfile, PersonaSummary, Priority, RoleType, SectionInsight, TaskType};
pub use ranker::PersonaRanker;
