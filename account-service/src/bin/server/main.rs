use std::sync::Arc;

use account_service::config::Config;
use account_service::config::SeedUserConfig;
use account_service::domain::user::models::SignupCommand;
use account_service::domain::user::ports::CredentialStore;
use account_service::domain::user::service::UserService;
use account_service::domain::user::validation::SignupValidator;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryCredentialStore;
use account_service::outbound::repositories::PostgresCredentialStore;
use auth::Authenticator;
use auth::SigningSecret;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        token_ttl_hours = config.jwt.expiration_hours,
        min_password_length = config.signup.min_password_length,
        "Configuration loaded"
    );

    let secret = SigningSecret::new(config.jwt.secret.as_bytes()).map_err(|e| {
        tracing::error!(error = %e, "Signing secret rejected, set JWT__SECRET");
        e
    })?;
    let token_ttl = config.jwt.token_ttl().map_err(|e| {
        tracing::error!(error = %e, "Token lifetime rejected");
        e
    })?;
    let authenticator = Arc::new(Authenticator::new(&secret, token_ttl));
    let validator = SignupValidator::new(config.signup.min_password_length);

    let http_application = match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresCredentialStore::new(pg_pool));
            build_application(store, validator, authenticator, config.seed.as_ref()).await?
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory only");
            let store = Arc::new(InMemoryCredentialStore::new());
            build_application(store, validator, authenticator, config.seed.as_ref()).await?
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}

async fn build_application<CS>(
    store: Arc<CS>,
    validator: SignupValidator,
    authenticator: Arc<Authenticator>,
    seed: Option<&SeedUserConfig>,
) -> Result<Router, anyhow::Error>
where
    CS: CredentialStore,
{
    let user_service = Arc::new(UserService::new(store, validator));

    if let Some(seed) = seed {
        let command = SignupCommand::new(
            seed.email.as_str(),
            seed.password.as_str(),
            seed.nickname.as_str(),
        );
        match user_service.ensure_user(command).await? {
            Some(user) => tracing::info!(user_id = %user.id, "Seed user created"),
            None => tracing::debug!(email = %seed.email, "Seed user already present"),
        }
    }

    Ok(create_router(user_service, authenticator))
}
