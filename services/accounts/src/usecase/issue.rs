use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{ActivityLog, Mailer, OneTimeCodeRepository, UserRepository};
use crate::domain::types::{
    ClientMeta, CodePurpose, NewActivity, OneTimeCode, User, CODE_TTL_SECS,
};
use crate::error::AccountsServiceError;
use crate::usecase::{ALREADY_VERIFIED_MESSAGE, CODE_SENT_MESSAGE};

/// Uniformly random six-digit code, "100000" through "999999".
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..=999_999u32).to_string()
}

/// Mint a fresh code for the user and purpose, replacing any earlier ones.
pub async fn issue_code<C: OneTimeCodeRepository>(
    codes: &C,
    user_id: Uuid,
    purpose: CodePurpose,
) -> Result<OneTimeCode, AccountsServiceError> {
    let code = OneTimeCode {
        id: Uuid::new_v4(),
        user_id,
        code: generate_code(),
        purpose,
        expires_at: Utc::now() + Duration::seconds(CODE_TTL_SECS),
        used_at: None,
        created_at: Utc::now(),
    };
    codes.replace_for_purpose(&code).await?;
    Ok(code)
}

/// Record an audit entry. Auditing is best-effort; failures are logged and
/// never bubble into the caller's response.
pub(crate) async fn append_activity<L: ActivityLog>(log: &L, entry: NewActivity) {
    if let Err(e) = log.append(&entry).await {
        tracing::warn!(error = %e, action = entry.action, "failed to append activity log");
    }
}

/// Send the code email on a detached task so delivery latency never holds up
/// the HTTP response. Failures are logged; the caller already answered.
pub(crate) fn spawn_code_email<M>(mailer: &M, user: &User, code: &OneTimeCode)
where
    M: Mailer + Clone + 'static,
{
    let mailer = mailer.clone();
    let email = user.email.clone();
    let full_name = user.full_name.clone();
    let value = code.code.clone();
    let purpose = code.purpose;
    tokio::spawn(async move {
        let sent = match purpose {
            CodePurpose::EmailVerification => {
                mailer.send_verification_code(&email, &full_name, &value).await
            }
            CodePurpose::PasswordReset => {
                mailer.send_password_reset_code(&email, &full_name, &value).await
            }
        };
        if let Err(e) = sent {
            tracing::warn!(error = %e, email, "failed to send one-time code email");
        }
    });
}

#[derive(Debug)]
pub struct IssueInput {
    pub email: String,
    pub client: ClientMeta,
}

/// Outcome of a code-request endpoint, already flattened to the message the
/// handler returns.
#[derive(Debug)]
pub struct IssueOutcome {
    pub message: &'static str,
}

impl IssueOutcome {
    fn code_sent() -> Self {
        Self { message: CODE_SENT_MESSAGE }
    }

    fn already_verified() -> Self {
        Self { message: ALREADY_VERIFIED_MESSAGE }
    }
}

/// Shared lookup for the enumeration-sensitive flows. An unknown email yields
/// `Err(code_sent)` for the caller to return verbatim, so both flows answer
/// identically by construction whether or not the account exists.
async fn find_user_or_silent_success<U: UserRepository>(
    users: &U,
    email: &str,
) -> Result<Result<User, IssueOutcome>, AccountsServiceError> {
    Ok(match users.find_by_email(email).await? {
        Some(user) => Ok(user),
        None => Err(IssueOutcome::code_sent()),
    })
}

/// Re-issue an email verification code for an unverified account.
pub struct ResendVerificationUseCase<U, C, M, L> {
    pub users: U,
    pub codes: C,
    pub mailer: M,
    pub activity: L,
}

impl<U, C, M, L> ResendVerificationUseCase<U, C, M, L>
where
    U: UserRepository,
    C: OneTimeCodeRepository,
    M: Mailer + Clone + 'static,
    L: ActivityLog,
{
    pub async fn execute(&self, input: IssueInput) -> Result<IssueOutcome, AccountsServiceError> {
        let email = crate::domain::types::normalize_email(&input.email);

        let user = match find_user_or_silent_success(&self.users, &email).await? {
            Ok(user) => user,
            Err(outcome) => return Ok(outcome),
        };
        if user.email_verified {
            return Ok(IssueOutcome::already_verified());
        }

        let code = issue_code(&self.codes, user.id, CodePurpose::EmailVerification).await?;
        spawn_code_email(&self.mailer, &user, &code);
        append_activity(
            &self.activity,
            NewActivity::for_user(user.id, "RESEND_VERIFICATION", &input.client),
        )
        .await;

        Ok(IssueOutcome::code_sent())
    }
}

/// Issue a password reset code for an account, real or not.
pub struct ForgotPasswordUseCase<U, C, M, L> {
    pub users: U,
    pub codes: C,
    pub mailer: M,
    pub activity: L,
}

impl<U, C, M, L> ForgotPasswordUseCase<U, C, M, L>
where
    U: UserRepository,
    C: OneTimeCodeRepository,
    M: Mailer + Clone + 'static,
    L: ActivityLog,
{
    pub async fn execute(&self, input: IssueInput) -> Result<IssueOutcome, AccountsServiceError> {
        let email = crate::domain::types::normalize_email(&input.email);

        let user = match find_user_or_silent_success(&self.users, &email).await? {
            Ok(user) => user,
            Err(outcome) => return Ok(outcome),
        };

        let code = issue_code(&self.codes, user.id, CodePurpose::PasswordReset).await?;
        spawn_code_email(&self.mailer, &user, &code);
        append_activity(
            &self.activity,
            NewActivity::for_user(user.id, "FORGOT_PASSWORD", &input.client)
                .with_metadata(serde_json::json!({ "email": email })),
        )
        .await;

        Ok(IssueOutcome::code_sent())
    }
}
