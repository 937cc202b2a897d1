use crate::domain::repository::{ActivityLog, OneTimeCodeRepository, UserRepository};
use crate::domain::types::{normalize_email, ClientMeta, CodePurpose, NewActivity};
use crate::error::AccountsServiceError;
use crate::password::hash_password;
use crate::usecase::issue::append_activity;
use crate::usecase::ALREADY_VERIFIED_MESSAGE;

#[derive(Debug)]
pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
    pub client: ClientMeta,
}

#[derive(Debug, PartialEq, Eq)]
pub enum VerifyEmailOutcome {
    Verified,
    /// The account was already verified; the submitted code is left untouched.
    AlreadyVerified,
}

impl VerifyEmailOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Verified => "Email verified successfully",
            Self::AlreadyVerified => ALREADY_VERIFIED_MESSAGE,
        }
    }
}

/// Consume an email verification code and mark the account verified.
pub struct VerifyEmailUseCase<U, C, L> {
    pub users: U,
    pub codes: C,
    pub activity: L,
}

impl<U, C, L> VerifyEmailUseCase<U, C, L>
where
    U: UserRepository,
    C: OneTimeCodeRepository,
    L: ActivityLog,
{
    pub async fn execute(
        &self,
        input: VerifyEmailInput,
    ) -> Result<VerifyEmailOutcome, AccountsServiceError> {
        let email = normalize_email(&input.email);

        // Same error for unknown email and wrong code.
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AccountsServiceError::InvalidCredential);
        };
        if user.email_verified {
            return Ok(VerifyEmailOutcome::AlreadyVerified);
        }

        let code = self
            .codes
            .find_unused(user.id, CodePurpose::EmailVerification, &input.code)
            .await?
            .ok_or(AccountsServiceError::InvalidOrUsedCode)?;
        if code.is_expired() {
            return Err(AccountsServiceError::ExpiredCode);
        }

        self.codes
            .consume_for_email_verification(code.id, user.id)
            .await?;

        append_activity(
            &self.activity,
            NewActivity::for_user(user.id, "VERIFY_EMAIL", &input.client),
        )
        .await;

        Ok(VerifyEmailOutcome::Verified)
    }
}

#[derive(Debug)]
pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub password: String,
    pub client: ClientMeta,
}

/// Consume a password reset code and replace the account password.
pub struct ResetPasswordUseCase<U, C, L> {
    pub users: U,
    pub codes: C,
    pub activity: L,
}

impl<U, C, L> ResetPasswordUseCase<U, C, L>
where
    U: UserRepository,
    C: OneTimeCodeRepository,
    L: ActivityLog,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AccountsServiceError> {
        let email = normalize_email(&input.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AccountsServiceError::InvalidCredential);
        };

        let code = self
            .codes
            .find_unused(user.id, CodePurpose::PasswordReset, &input.code)
            .await?
            .ok_or(AccountsServiceError::InvalidOrUsedCode)?;
        if code.is_expired() {
            return Err(AccountsServiceError::ExpiredCode);
        }

        let password_hash = hash_password(&input.password)?;
        self.codes
            .consume_for_password_reset(code.id, user.id, &password_hash)
            .await?;

        append_activity(
            &self.activity,
            NewActivity::for_user(user.id, "RESET_PASSWORD", &input.client),
        )
        .await;

        Ok(())
    }
}
