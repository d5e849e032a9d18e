//! Disease knowledge base and keyword matching.
//!
//! The knowledge base is loaded once at startup and never mutated.
//! `find_best_match` scores free text (typed symptoms or text extracted
//! from a lab report) against it in a single pass.

pub mod lab_rules;
pub mod matcher;
pub mod store;

pub use lab_rules::*;
pub use matcher::*;
pub use store::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading knowledge base: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed knowledge base JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
