use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::error::{AccountsServiceError, FieldErrors};
use crate::handlers::{check_email, check_otp, check_password, client_meta, MessageResponse};
use crate::state::AppState;
use crate::usecase::issue::{ForgotPasswordUseCase, IssueInput};
use crate::usecase::verify::{ResetPasswordInput, ResetPasswordUseCase};

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AccountsServiceError> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, &req.email);
    errors.into_result()?;

    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        codes: state.code_repo(),
        mailer: state.mailer(),
        activity: state.activity_log(),
    };
    let outcome = usecase
        .execute(IssueInput {
            email: req.email,
            client: client_meta(&headers),
        })
        .await?;

    Ok(Json(MessageResponse { message: outcome.message }))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AccountsServiceError> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, &req.email);
    check_otp(&mut errors, &req.otp);
    check_password(&mut errors, &req.password);
    errors.into_result()?;

    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        codes: state.code_repo(),
        activity: state.activity_log(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: req.email,
            code: req.otp,
            password: req.password,
            client: client_meta(&headers),
        })
        .await?;

    Ok(Json(MessageResponse { message: "Password reset successfully" }))
}
