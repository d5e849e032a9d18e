//! Downloadable PDF documents: the one-page health report and the
//! multi-page weekly diet plan.

pub mod diet;
pub mod health;
pub mod layout;

pub use diet::*;
pub use health::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF save error: {0}")]
    Save(String),
}
