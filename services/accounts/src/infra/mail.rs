use anyhow::anyhow;

use crate::domain::repository::Mailer;
use crate::error::AccountsServiceError;

/// Mailer backed by a transactional mail HTTP API.
#[derive(Clone)]
pub struct HttpMailer {
    pub http: reqwest::Client,
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
}

impl HttpMailer {
    async fn send(
        &self,
        to: &str,
        to_name: &str,
        subject: &str,
        text: &str,
    ) -> Result<(), AccountsServiceError> {
        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": self.sender,
                "to": [{ "email": to, "name": to_name }],
                "subject": subject,
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| AccountsServiceError::Internal(anyhow!("mail API request: {e}")))?;
        if !resp.status().is_success() {
            return Err(AccountsServiceError::Internal(anyhow!(
                "mail API returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

impl Mailer for HttpMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        full_name: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        let text = format!(
            "Hi {full_name},\n\nYour email verification code is {code}. \
             It expires in 5 minutes.\n\nIf you did not create an account, ignore this email."
        );
        self.send(email, full_name, "Verify your email", &text).await
    }

    async fn send_password_reset_code(
        &self,
        email: &str,
        full_name: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        let text = format!(
            "Hi {full_name},\n\nYour password reset code is {code}. \
             It expires in 5 minutes.\n\nIf you did not request a reset, ignore this email."
        );
        self.send(email, full_name, "Reset your password", &text).await
    }
}
