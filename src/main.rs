use anyhow::Result;
use campus_core::{
    application::{
        ports::{security::Authenticator, time::Clock},
        services::ApplicationServices,
    },
    config::AppConfig,
    domain::{
        audit::AuditLogRepository,
        entity::RecordRepository,
        school::{self, Payment, Student},
    },
    infrastructure::{
        database,
        repositories::{PostgresAuditLogRepository, PostgresRecordRepository},
        security::BiscuitAuthenticator,
        time::SystemClock,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.db_max_connections()).await?;
    database::run_migrations(&pool).await?;
    school::validate_all()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let student_repo: Arc<dyn RecordRepository<Student>> =
        Arc::new(PostgresRecordRepository::new(pool.clone(), Arc::clone(&clock)));
    let payment_repo: Arc<dyn RecordRepository<Payment>> =
        Arc::new(PostgresRecordRepository::new(pool.clone(), Arc::clone(&clock)));
    let audit_log_repo: Arc<dyn AuditLogRepository> =
        Arc::new(PostgresAuditLogRepository::new(pool.clone()));
    let authenticator: Arc<dyn Authenticator> =
        Arc::new(BiscuitAuthenticator::new(config.biscuit_public_key())?);

    let services = Arc::new(ApplicationServices::new(
        student_repo,
        payment_repo,
        audit_log_repo,
        authenticator,
        Arc::clone(&clock),
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
