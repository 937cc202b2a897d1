#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use lentera_accounts::domain::repository::{
    ActivityLog, Mailer, OneTimeCodeRepository, UserRepository,
};
use lentera_accounts::domain::types::{
    ClientMeta, CodePurpose, NewActivity, OneTimeCode, User, UserRole,
};
use lentera_accounts::error::AccountsServiceError;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── Fixtures ────────────────────────────────────────────────────────────────

pub fn test_user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        password_hash: lentera_accounts::password::hash_password("original password").unwrap(),
        full_name: "Test User".to_owned(),
        role: UserRole::Student,
        disability_type: None,
        email_verified: false,
        email_verified_at: None,
        created_at: Utc::now(),
    }
}

pub fn live_code(user_id: Uuid, purpose: CodePurpose, value: &str) -> OneTimeCode {
    OneTimeCode {
        id: Uuid::new_v4(),
        user_id,
        code: value.to_owned(),
        purpose,
        expires_at: Utc::now() + Duration::minutes(5),
        used_at: None,
        created_at: Utc::now(),
    }
}

pub fn expired_code(user_id: Uuid, purpose: CodePurpose, value: &str) -> OneTimeCode {
    OneTimeCode {
        expires_at: Utc::now() - Duration::seconds(1),
        ..live_code(user_id, purpose, value)
    }
}

pub fn client() -> ClientMeta {
    ClientMeta {
        ip_address: Some("203.0.113.7".to_owned()),
        user_agent: Some("integration-tests/1.0".to_owned()),
    }
}

/// Give spawned fire-and-forget tasks a chance to run to completion.
pub async fn drain_spawned() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

// ── Mock repositories ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        self.users.clone()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

/// Shares the user store with [`MockUserRepo`] so consumption updates the
/// same rows a real transaction would.
#[derive(Clone)]
pub struct MockCodeRepo {
    codes: Arc<Mutex<Vec<OneTimeCode>>>,
    users: Arc<Mutex<Vec<User>>>,
}

impl MockCodeRepo {
    pub fn sharing_users(users: &MockUserRepo) -> Self {
        Self {
            codes: Arc::new(Mutex::new(Vec::new())),
            users: users.users_handle(),
        }
    }

    pub fn with_codes(users: &MockUserRepo, codes: Vec<OneTimeCode>) -> Self {
        let repo = Self::sharing_users(users);
        *repo.codes.lock().unwrap() = codes;
        repo
    }

    pub fn codes_handle(&self) -> Arc<Mutex<Vec<OneTimeCode>>> {
        self.codes.clone()
    }
}

impl OneTimeCodeRepository for MockCodeRepo {
    async fn replace_for_purpose(&self, code: &OneTimeCode) -> Result<(), AccountsServiceError> {
        let mut codes = self.codes.lock().unwrap();
        codes.retain(|c| !(c.user_id == code.user_id && c.purpose == code.purpose));
        codes.push(code.clone());
        Ok(())
    }

    async fn find_unused(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<Option<OneTimeCode>, AccountsServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| {
                c.user_id == user_id
                    && c.purpose == purpose
                    && c.code == code
                    && c.used_at.is_none()
            })
            .cloned())
    }

    async fn consume_for_email_verification(
        &self,
        code_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        let now = Utc::now();
        {
            let mut codes = self.codes.lock().unwrap();
            let code = codes
                .iter_mut()
                .find(|c| c.id == code_id)
                .expect("code to consume");
            code.used_at = Some(now);
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .expect("user to verify");
        user.email_verified = true;
        user.email_verified_at = Some(now);
        Ok(())
    }

    async fn consume_for_password_reset(
        &self,
        code_id: Uuid,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        {
            let mut codes = self.codes.lock().unwrap();
            let code = codes
                .iter_mut()
                .find(|c| c.id == code_id)
                .expect("code to consume");
            code.used_at = Some(Utc::now());
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .expect("user to update");
        user.password_hash = password_hash.to_owned();
        Ok(())
    }
}

// ── Mock mailer ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub email: String,
    pub code: String,
    pub purpose: CodePurpose,
}

#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    fail: Arc<AtomicBool>,
}

impl MockMailer {
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentMail>>> {
        self.sent.clone()
    }

    fn record(&self, email: &str, code: &str, purpose: CodePurpose) -> Result<(), AccountsServiceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AccountsServiceError::Internal(anyhow::anyhow!(
                "mail API unavailable"
            )));
        }
        self.sent.lock().unwrap().push(SentMail {
            email: email.to_owned(),
            code: code.to_owned(),
            purpose,
        });
        Ok(())
    }
}

impl Mailer for MockMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        _full_name: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        self.record(email, code, CodePurpose::EmailVerification)
    }

    async fn send_password_reset_code(
        &self,
        email: &str,
        _full_name: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        self.record(email, code, CodePurpose::PasswordReset)
    }
}

// ── Mock activity log ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockActivityLog {
    entries: Arc<Mutex<Vec<NewActivity>>>,
}

impl MockActivityLog {
    pub fn entries_handle(&self) -> Arc<Mutex<Vec<NewActivity>>> {
        self.entries.clone()
    }
}

impl ActivityLog for MockActivityLog {
    async fn append(&self, entry: &NewActivity) -> Result<(), AccountsServiceError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
