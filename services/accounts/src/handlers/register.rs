use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{User, UserRole};
use crate::error::{AccountsServiceError, FieldErrors};
use crate::handlers::{check_email, check_password, client_meta};
use crate::state::AppState;
use crate::usecase::register::{RegisterInput, RegisterUseCase};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub disability_type: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), AccountsServiceError> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if self.full_name.trim().is_empty() {
            errors.push("full_name", "full name is required");
        }
        if self.disability_type.trim().is_empty() {
            errors.push("disability_type", "disability type is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub disability_type: Option<String>,
    #[serde(serialize_with = "lentera_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            disability_type: user.disability_type,
            created_at: user.created_at,
        }
    }
}

/// Tokens are camelCase for the web client; everything else stays snake_case
/// like the stored user record.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserResponse,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AccountsServiceError> {
    req.validate()?;

    let usecase = RegisterUseCase {
        users: state.user_repo(),
        codes: state.code_repo(),
        mailer: state.mailer(),
        activity: state.activity_log(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            disability_type: req.disability_type,
            client: client_meta(&headers),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful, check your email for the verification code",
            user: output.user.into(),
            access_token: output.access_token,
            refresh_token: output.refresh_token,
        }),
    ))
}
