//! Account endpoints. Business-rule failures (duplicate email, bad
//! password) are `200` with `status: "error"`; only storage faults are 5xx.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::run_blocking;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AuthRequest, AuthResponse};

/// `POST /signup`
pub async fn signup(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = payload?;
    let users = ctx.core.users.clone();
    let response = run_blocking(move || users.signup(&req)).await??;
    Ok(Json(response))
}

/// `POST /login`
pub async fn login(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = payload?;
    let users = ctx.core.users.clone();
    let response = run_blocking(move || users.login(&req.email, &req.password)).await??;
    Ok(Json(response))
}
