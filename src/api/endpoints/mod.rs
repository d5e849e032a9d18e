pub mod analyze;
pub mod auth;
pub mod chat;
pub mod health;
pub mod reports;

use crate::api::error::ApiError;

/// Run blocking work (PDF parsing, OCR, SQLite, outbound HTTP) off the
/// async executor.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}
