//! # Extraction Module
//!
//! Recipe-driven extraction of structured records from scientific papers.
//!
//! - [`ExtractionOrchestrator`] - upload once, run the metadata, tables and
//!   figures, and content passes in order, fold them into a
//!   [`CompositeRecord`]
//! - [`BatchRunner`] - fan the orchestrator out over many documents with
//!   per-document failure isolation

mod batch;
mod errors;
mod orchestrator;
mod recipe;


pub use batch::{BatchItem, BatchRunner};
pub use errors::{ExtractionError, PassError};
pub use orchestrator::ExtractionOrchestrator;
pub use recipe::{
    CompositeRecord, ContentData, FigureEntry, Metadata, Recipe, Reference, Section, TableEntry,
    TablesAndFigures,
};
