/// Accounts service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// Outbound mail delivery settings.
    pub mail: MailConfig,
    /// TCP port to listen on (default 3114). Env var: `ACCOUNTS_PORT`.
    pub accounts_port: u16,
}

/// Transactional mail API settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Send endpoint of the mail API (e.g. "https://api.mail.example/v1/send").
    /// Env var: `MAIL_API_URL`.
    pub api_url: String,
    /// Bearer token for the mail API. Env var: `MAIL_API_KEY`.
    pub api_key: String,
    /// From address for outgoing mail. Env var: `MAIL_SENDER`.
    pub sender: String,
}

impl AccountsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            mail: MailConfig {
                api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
                api_key: std::env::var("MAIL_API_KEY").expect("MAIL_API_KEY"),
                sender: std::env::var("MAIL_SENDER").expect("MAIL_SENDER"),
            },
            accounts_port: std::env::var("ACCOUNTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
        }
    }
}
