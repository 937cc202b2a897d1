use sea_orm::Database;
use tracing::info;

use lentera_accounts::config::AccountsConfig;
use lentera_accounts::router::build_router;
use lentera_accounts::state::AppState;

#[tokio::main]
async fn main() {
    lentera_core::tracing::init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        http: reqwest::Client::new(),
        jwt_secret: config.jwt_secret,
        mail: config.mail,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
