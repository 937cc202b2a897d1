pub mod password;
pub mod register;
pub mod verification;

use axum::http::HeaderMap;
use serde::Serialize;

use crate::domain::types::{is_valid_code, is_valid_email, ClientMeta};
use crate::error::FieldErrors;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub(crate) const PASSWORD_MIN_LEN: usize = 8;
pub(crate) const PASSWORD_MAX_LEN: usize = 128;

/// Extract client ip and user agent for the audit trail. The ip comes from
/// `x-forwarded-for` (first hop) or `x-real-ip`, set by the edge proxy.
pub(crate) fn client_meta(headers: &HeaderMap) -> ClientMeta {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        });
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    ClientMeta { ip_address, user_agent }
}

pub(crate) fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email.trim()) {
        errors.push("email", "invalid email format");
    }
}

pub(crate) fn check_otp(errors: &mut FieldErrors, code: &str) {
    if !is_valid_code(code) {
        errors.push("otp", "code must be exactly six digits");
    }
}

pub(crate) fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.len() < PASSWORD_MIN_LEN {
        errors.push(
            "password",
            format!("password must be at least {PASSWORD_MIN_LEN} characters"),
        );
    } else if password.len() > PASSWORD_MAX_LEN {
        errors.push(
            "password",
            format!("password must be at most {PASSWORD_MAX_LEN} characters"),
        );
    }
}
