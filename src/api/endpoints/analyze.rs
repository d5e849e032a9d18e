//! Symptom and lab-report analysis endpoints.
//!
//! - `POST /analyze`: typed symptoms
//! - `POST /analyze_file`: multipart upload of a PDF or image lab report

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use super::run_blocking;
use crate::analysis::{analyze_extracted, analyze_text};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AnalysisReport, SymptomInput};
use crate::pipeline::extraction::UploadedFile;

/// Multipart field carrying the report.
const FILE_FIELD: &str = "file";

pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SymptomInput>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(input) = payload?;
    let report = analyze_text(&ctx.core.knowledge, &input.text);
    tracing::info!(
        condition = %report.condition,
        confidence = %report.confidence,
        "Symptom analysis"
    );
    Ok(Json(report))
}

pub async fn analyze_file(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    let upload = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'")))?;

    tracing::info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        size = upload.bytes.len(),
        "Lab report upload"
    );

    let extractor = ctx.core.extractor.clone();
    let knowledge = ctx.core.knowledge.clone();
    let report = run_blocking(move || {
        let text = extractor.extract(&upload);
        analyze_extracted(&knowledge, &text)
    })
    .await?;

    tracing::info!(
        condition = %report.condition,
        confidence = %report.confidence,
        "Lab report analysis"
    );
    Ok(Json(report))
}

/// Drain the multipart stream, keeping the first `file` field.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    let mut found = None;
    while let Some(field) = multipart.next_field().await? {
        if found.is_some() || field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();
        found = Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Ok(found)
}
