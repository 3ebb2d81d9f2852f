use std::sync::Arc;

use auth::Authenticator;
use identity_service::account::ports::IdentityStore;
use identity_service::account::resolver::IdentityResolver;
use identity_service::account::service::AccountService;
use identity_service::config::Config;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::routes::RouteTable;
use identity_service::repositories::PostgresIdentityStore;
use identity_service::session::issuer::SessionIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_hours = config.session.expiration_hours,
        lookup_timeout_ms = config.identity.lookup_timeout_ms,
        routes = config.gate.routes.len(),
        "Configuration loaded"
    );

    let secret = config.session.resolve_secret()?;

    // Connects on first use; an unreachable database shows up as failed store lookups.
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.identity.lookup_timeout())
        .connect_lazy(&config.database.url)?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    let stores: Vec<Arc<dyn IdentityStore>> = vec![
        Arc::new(PostgresIdentityStore::admins(pg_pool.clone())),
        Arc::new(PostgresIdentityStore::students(pg_pool.clone())),
        Arc::new(PostgresIdentityStore::teachers(pg_pool)),
    ];
    let resolver = IdentityResolver::new(stores, config.identity.lookup_timeout());

    let authenticator = Arc::new(Authenticator::new(
        secret.as_bytes(),
        config.session.expiration_hours,
    ));
    let account_service = Arc::new(AccountService::new(
        resolver,
        authenticator.password_hasher(),
        config.credentials.rehash_legacy_passwords,
    ));
    let session_issuer = Arc::new(SessionIssuer::new(Arc::clone(&authenticator)));
    let route_table = Arc::new(RouteTable::new(&config.gate));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        session_issuer,
        route_table,
        &config.session,
    );
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
