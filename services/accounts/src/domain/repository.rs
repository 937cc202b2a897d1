#![allow(async_fn_in_trait)]

use std::future::Future;

use uuid::Uuid;

use crate::domain::types::{CodePurpose, NewActivity, OneTimeCode, User};
use crate::error::AccountsServiceError;

/// Repository for user identity records.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError>;
    async fn create(&self, user: &User) -> Result<(), AccountsServiceError>;
}

/// Ledger of one-time codes keyed by (user, purpose).
pub trait OneTimeCodeRepository: Send + Sync {
    /// Delete every code for `(code.user_id, code.purpose)` and insert the
    /// replacement in the same transaction, so exactly one authoritative code
    /// exists for the pair afterwards.
    async fn replace_for_purpose(&self, code: &OneTimeCode) -> Result<(), AccountsServiceError>;

    /// Find a code matching (user, purpose, value) with `used_at` unset.
    /// Expiry is NOT filtered here: the caller distinguishes an expired code
    /// from an unknown or consumed one.
    async fn find_unused(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<Option<OneTimeCode>, AccountsServiceError>;

    /// Mark the code used and flag the user's email as verified, atomically.
    async fn consume_for_email_verification(
        &self,
        code_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AccountsServiceError>;

    /// Mark the code used and store the new password hash, atomically.
    async fn consume_for_password_reset(
        &self,
        code_id: Uuid,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Append-only audit trail. Callers treat failures as best-effort.
pub trait ActivityLog: Send + Sync {
    async fn append(&self, entry: &NewActivity) -> Result<(), AccountsServiceError>;
}

/// Outbound mail delivery. Futures are `Send` because sends are spawned off
/// the request task; delivery must never delay or fail the response.
pub trait Mailer: Send + Sync {
    fn send_verification_code(
        &self,
        email: &str,
        full_name: &str,
        code: &str,
    ) -> impl Future<Output = Result<(), AccountsServiceError>> + Send;

    fn send_password_reset_code(
        &self,
        email: &str,
        full_name: &str,
        code: &str,
    ) -> impl Future<Output = Result<(), AccountsServiceError>> + Send;
}
