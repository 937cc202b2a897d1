use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::error::{AccountsServiceError, FieldErrors};
use crate::handlers::{check_email, check_otp, client_meta, MessageResponse};
use crate::state::AppState;
use crate::usecase::issue::{IssueInput, ResendVerificationUseCase};
use crate::usecase::verify::{VerifyEmailInput, VerifyEmailUseCase};

#[derive(Debug, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

pub async fn resend_verification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, AccountsServiceError> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, &req.email);
    errors.into_result()?;

    let usecase = ResendVerificationUseCase {
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
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

pub async fn verify_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<MessageResponse>, AccountsServiceError> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, &req.email);
    check_otp(&mut errors, &req.otp);
    errors.into_result()?;

    let usecase = VerifyEmailUseCase {
        users: state.user_repo(),
        codes: state.code_repo(),
        activity: state.activity_log(),
    };
    let outcome = usecase
        .execute(VerifyEmailInput {
            email: req.email,
            code: req.otp,
            client: client_meta(&headers),
        })
        .await?;

    Ok(Json(MessageResponse { message: outcome.message() }))
}
