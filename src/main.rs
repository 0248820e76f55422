use anyhow::Result;
use recipe_box::application::{
    ports::{
        auth::AuthBackend,
        recipes::RecipeCatalog,
        storage::ObjectStorage,
        util::{SlugGenerator, TokenGenerator},
    },
    services::ApplicationServices,
};
use recipe_box::config::AppConfig;
use recipe_box::infrastructure::{
    supabase::{SupabaseAuthBackend, SupabaseClient, SupabaseObjectStorage, SupabaseRecipeCatalog},
    util::{DefaultSlugGenerator, UuidTokenGenerator},
};
use recipe_box::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState},
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

    let client = SupabaseClient::new(config.supabase_url(), config.supabase_anon_key())?;
    let bucket = SupabaseObjectStorage::new(client.clone(), config.storage_bucket());
    tracing::info!(
        backend = %client.base_url(),
        bucket = bucket.bucket(),
        "backend configured"
    );

    let auth: Arc<dyn AuthBackend> = Arc::new(SupabaseAuthBackend::new(client.clone()));
    let storage: Arc<dyn ObjectStorage> = Arc::new(bucket);
    let recipes: Arc<dyn RecipeCatalog> = Arc::new(SupabaseRecipeCatalog::new(client));
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let tokens: Arc<dyn TokenGenerator> = Arc::new(UuidTokenGenerator);

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&auth),
        Arc::clone(&storage),
        Arc::clone(&recipes),
        Arc::clone(&slugger),
        Arc::clone(&tokens),
    ));

    let state = HttpState {
        services: Arc::clone(&services),
        settings: HttpSettings {
            public_origin: config.public_origin().map(str::to_string),
            cookie_secure: config.cookie_secure(),
        },
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info".to_string());

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
            tracing::error!(error = %err, "failed to listen for CTRL+C");
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
