//! PDF download endpoints.

use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::run_blocking;
use crate::api::error::ApiError;
use crate::report::{generate_diet_plan, generate_health_report, DietPlanRequest, HealthReportRequest};

fn pdf_attachment(bytes: Vec<u8>, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// `POST /generate_pdf`: one-page health report.
pub async fn health_report(
    payload: Result<Json<HealthReportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let bytes = run_blocking(move || generate_health_report(&req)).await??;
    tracing::info!(size = bytes.len(), "Health report generated");
    Ok(pdf_attachment(bytes, "report.pdf"))
}

/// `POST /generate_diet_pdf`: weekly diet plan.
pub async fn diet_plan(
    payload: Result<Json<DietPlanRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let bytes = run_blocking(move || generate_diet_plan(&req)).await??;
    tracing::info!(size = bytes.len(), "Diet plan generated");
    Ok(pdf_attachment(bytes, "diet_plan.pdf"))
}
