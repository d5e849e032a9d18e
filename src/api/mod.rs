//! HTTP API.
//!
//! `api_router()` returns a composable `Router` with every NutriCare
//! endpoint mounted at the root, wrapped in CORS, request tracing and the
//! upload size limit. `server` owns the listener lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server_on, ApiServer, ApiServerSession};
pub use types::ApiContext;
