use uuid::Uuid;

use crate::domain::repository::{ActivityLog, Mailer, OneTimeCodeRepository, UserRepository};
use crate::domain::types::{normalize_email, ClientMeta, CodePurpose, NewActivity, User, UserRole};
use crate::error::AccountsServiceError;
use crate::password::hash_password;
use crate::usecase::issue::{append_activity, issue_code, spawn_code_email};
use crate::usecase::token::{issue_access_token, issue_refresh_token};

#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub disability_type: String,
    pub client: ClientMeta,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Create an account, mint its first verification code and session tokens.
pub struct RegisterUseCase<U, C, M, L> {
    pub users: U,
    pub codes: C,
    pub mailer: M,
    pub activity: L,
    pub jwt_secret: String,
}

impl<U, C, M, L> RegisterUseCase<U, C, M, L>
where
    U: UserRepository,
    C: OneTimeCodeRepository,
    M: Mailer + Clone + 'static,
    L: ActivityLog,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AccountsServiceError> {
        let email = normalize_email(&input.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountsServiceError::EmailTaken);
        }

        let password_hash = hash_password(&input.password)?;
        let role = if input.disability_type == "MENTOR" {
            UserRole::Mentor
        } else {
            UserRole::Student
        };
        // "STUDENT" and "MENTOR" are role picks from the signup form, not
        // disability categories; store them as no disability.
        let disability_type = match input.disability_type.as_str() {
            "STUDENT" | "MENTOR" => None,
            other => Some(other.to_owned()),
        };

        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            full_name: input.full_name,
            role,
            disability_type,
            email_verified: false,
            email_verified_at: None,
            created_at: chrono::Utc::now(),
        };
        self.users.create(&user).await?;

        let code = issue_code(&self.codes, user.id, CodePurpose::EmailVerification).await?;
        spawn_code_email(&self.mailer, &user, &code);

        let access_token = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        append_activity(
            &self.activity,
            NewActivity::for_user(user.id, "REGISTER", &input.client),
        )
        .await;

        Ok(RegisterOutput { user, access_token, refresh_token })
    }
}
