use sea_orm::DatabaseConnection;

use crate::config::MailConfig;
use crate::infra::db::{DbActivityLog, DbOneTimeCodeRepository, DbUserRepository};
use crate::infra::mail::HttpMailer;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub jwt_secret: String,
    pub mail: MailConfig,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository { db: self.db.clone() }
    }

    pub fn code_repo(&self) -> DbOneTimeCodeRepository {
        DbOneTimeCodeRepository { db: self.db.clone() }
    }

    pub fn activity_log(&self) -> DbActivityLog {
        DbActivityLog { db: self.db.clone() }
    }

    pub fn mailer(&self) -> HttpMailer {
        HttpMailer {
            http: self.http.clone(),
            api_url: self.mail.api_url.clone(),
            api_key: self.mail.api_key.clone(),
            sender: self.mail.sender.clone(),
        }
    }
}
