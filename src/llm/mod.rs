//! Client for the hosted chat-completion provider (Groq's OpenAI-compatible API).

pub mod groq;
pub mod types;

pub use groq::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Chat provider unreachable at {0}")]
    Connection(String),

    #[error("Chat provider returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Chat provider returned no choices")]
    EmptyResponse,
}
