//! tamm-api HTTP server.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tamm_api::adapters::auth::SupabaseAuthProvider;
use tamm_api::adapters::blog::FeedChannel;
use tamm_api::adapters::content::FsContentCatalog;
use tamm_api::adapters::http::{
    app_router, AdminToken, BlogAppState, HttpSettings, MembershipAppState, SiteLinks,
};
use tamm_api::adapters::markdown::PulldownRenderer;
use tamm_api::adapters::membership::SupabaseMemberStore;
use tamm_api::adapters::postgres::PostgresPostRepository;
use tamm_api::config::{AppConfig, DatabaseConfig};
use tamm_api::domain::membership::{KofiTokenVerifier, RedirectSigner};
use tamm_api::ports::MarkdownRenderer;

const MIGRATIONS_DIR: &str = "migrations";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);
    tracing::info!(environment = ?config.server.environment, "Starting tamm-api");

    let http = reqwest::Client::builder()
        .timeout(config.server.request_timeout())
        .build()
        .context("failed to build HTTP client")?;

    let markdown: Arc<dyn MarkdownRenderer> = Arc::new(PulldownRenderer::new());

    let membership = MembershipAppState {
        auth_provider: Arc::new(SupabaseAuthProvider::new(http.clone(), &config.supabase)),
        member_store: Arc::new(SupabaseMemberStore::new(http, &config.supabase)),
        content_catalog: Arc::new(FsContentCatalog::new(&config.content.dir)),
        markdown: markdown.clone(),
        webhook_verifier: Arc::new(KofiTokenVerifier::new(
            config.kofi.verification_token.clone(),
        )),
        redirect_signer: RedirectSigner::new(config.site.cookie_secret.clone()),
        links: SiteLinks::from_config(&config.site, &config.kofi),
    };

    let blog = match &config.database {
        Some(database) => {
            let repository = connect_posts(database).await?;
            Some(BlogAppState {
                posts: Arc::new(repository),
                markdown,
                feed: FeedChannel::for_site(config.site.site_origin()),
                page_size: config.site.posts_page_size as usize,
                admin: AdminToken::new(config.site.admin_token.clone()),
            })
        }
        None => {
            tracing::warn!("No database configured, blog routes disabled");
            None
        }
    };
    if blog.is_some() && config.site.admin_token.is_none() {
        tracing::warn!("No admin token configured, blog admin routes will refuse every request");
    }

    let settings = HttpSettings {
        allowed_origin: config.site.site_origin().to_string(),
        request_timeout: config.server.request_timeout(),
    };
    let app = app_router(membership, blog, &settings).context("invalid site origin")?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn connect_posts(database: &DatabaseConfig) -> anyhow::Result<PostgresPostRepository> {
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await
        .context("failed to connect to database")?;

    if database.run_migrations {
        sqlx::migrate::Migrator::new(Path::new(MIGRATIONS_DIR))
            .await?
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    Ok(PostgresPostRepository::new(pool))
}
