use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Field-level validation failures, keyed by request field name.
/// Serialized as the `details` object the web client renders inline.
#[derive(Debug, Default, serde::Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok` when no field failed, otherwise a `Validation` error.
    pub fn into_result(self) -> Result<(), AccountsServiceError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AccountsServiceError::Validation(self))
        }
    }
}

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("email is already registered")]
    EmailTaken,
    /// Deliberately the same wording whether the email is unknown or the code
    /// is wrong — the verification flows must not confirm account existence.
    #[error("code is invalid or has expired")]
    InvalidCredential,
    #[error("code is invalid or has already been used")]
    InvalidOrUsedCode,
    /// Distinct from the generic failures so the client can prompt a resend.
    #[error("code has expired, request a new one")]
    ExpiredCode,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::InvalidOrUsedCode => "INVALID_OR_USED_CODE",
            Self::ExpiredCode => "EXPIRED_CODE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_)
            | Self::InvalidCredential
            | Self::InvalidOrUsedCode
            | Self::ExpiredCode => StatusCode::BAD_REQUEST,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for every request, and 4xx here are expected client errors. Internal
        // errors carry the anyhow chain, which is the part worth keeping.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        if let Self::Validation(details) = &self {
            body["details"] = serde_json::to_value(details).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
