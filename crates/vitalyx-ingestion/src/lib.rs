//! vitalyx-ingestion — Biomarker extraction from unstructured lab reports.
//!
//! The contract at this boundary: unrecognized or unparsable markers become
//! absent fields, never errors. Only an unreadable document itself is an
//! error; the engine treats the output exactly like any partial panel.

pub mod extractor;
pub mod pdf;

pub use extractor::{BiomarkerExtractor, ExtractionOutcome};
pub use pdf::extract_text_from_pdf;
