use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platform role stored on the user row.
/// Wire format: SCREAMING_SNAKE_CASE strings; column format: `i16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student = 0,
    Mentor = 1,
    Admin = 2,
}

impl UserRole {
    /// Convert from the `i16` column value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Student),
            1 => Some(Self::Mentor),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

/// Why a one-time code was issued. Scopes which rows a verification lookup
/// may match: a reset code can never verify an email, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    EmailVerification = 0,
    PasswordReset = 1,
}

impl CodePurpose {
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::EmailVerification),
            1 => Some(Self::PasswordReset),
            _ => None,
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

/// User identity record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub disability_type: Option<String>,
    pub email_verified: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Single-use, time-boxed credential proof delivered out-of-band.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub purpose: CodePurpose,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Usable right now: never consumed and not yet past its expiry.
    pub fn is_live(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Request-scoped client metadata recorded with audit entries.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Audit entry before persistence assigns an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Uuid,
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: Uuid,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl NewActivity {
    pub fn for_user(user_id: Uuid, action: &'static str, client: &ClientMeta) -> Self {
        Self {
            user_id,
            action,
            entity_type: "user",
            entity_id: user_id,
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// One-time codes are exactly this many ASCII digits.
pub const CODE_LEN: usize = 6;

/// One-time code time-to-live in seconds.
pub const CODE_TTL_SECS: i64 = 5 * 60;

/// Trim and lowercase so email matching is effectively case-insensitive.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Liberal shape check: one `@`, a non-empty local part, a dotted domain,
/// no whitespace. Deliverability is the mail provider's problem.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Exactly [`CODE_LEN`] ASCII digits.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
