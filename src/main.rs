mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::router::{build_router, AppServices};
use crate::core::{database, middleware};
use crate::features::admin::repositories::PgAdminRepository;
use crate::features::admin::AdminService;
use crate::features::auth;
use crate::features::auth::clients::LogtoAuthClient;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::auth::session::SessionResolver;
use crate::features::cart::repositories::PgCartRepository;
use crate::features::cart::CartService;
use crate::features::categories::repositories::PgCategoryRepository;
use crate::features::categories::CategoryService;
use crate::features::collections::repositories::PgCollectionRepository;
use crate::features::collections::CollectionService;
use crate::features::logto::LogtoTokenManager;
use crate::features::pages::PageRenderer;
use crate::features::products::repositories::PgProductRepository;
use crate::features::products::ProductService;
use crate::features::profiles::repositories::PgProfileRepository;
use crate::features::profiles::ProfileService;
use crate::shared::i18n::Translations;
use crate::shared::templates::TemplateEngine;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Templates and translations are embedded; fail at startup, not on first render
    let translations = Arc::new(
        Translations::load_embedded()
            .map_err(|e| anyhow::anyhow!("Failed to load translations: {}", e))?,
    );
    let templates = TemplateEngine::load_embedded()
        .map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?;
    let renderer = Arc::new(PageRenderer::new(templates, translations));
    tracing::info!("Templates and translations loaded");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Session verification against the identity provider's JWKS
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.issuer,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
    ));
    tracing::info!("Auth configuration initialized");

    let logto_token_manager = Arc::new(LogtoTokenManager::new(config.logto_m2m.clone()));
    let logto_auth_client = Arc::new(LogtoAuthClient::new(Arc::clone(&logto_token_manager)));
    let token_service = Arc::new(TokenService::new(
        config.auth_token.clone(),
        Arc::clone(&logto_token_manager),
    ));
    tracing::info!("Logto clients initialized");

    let profile_repository = Arc::new(PgProfileRepository::new(pool.clone()));
    let profile_service = Arc::new(ProfileService::new(profile_repository.clone()));

    let auth_service = Arc::new(AuthService::new(
        logto_auth_client,
        token_service.clone(),
        Arc::clone(&profile_service),
    ));
    let session_resolver = Arc::new(SessionResolver::new(
        jwt_validator,
        token_service,
        config.session.clone(),
    ));
    let authorizer = Arc::new(auth::Authorizer::new(profile_repository));
    tracing::info!("Auth service initialized");

    let product_service = Arc::new(ProductService::new(Arc::new(PgProductRepository::new(
        pool.clone(),
    ))));
    let category_service = Arc::new(CategoryService::new(Arc::new(PgCategoryRepository::new(
        pool.clone(),
    ))));
    let collection_service = Arc::new(CollectionService::new(
        Arc::new(PgCollectionRepository::new(pool.clone())),
        Arc::clone(&product_service),
    ));
    tracing::info!("Catalog services initialized");

    let cart_service = Arc::new(CartService::new(
        Arc::new(PgCartRepository::new(pool.clone())),
        Arc::clone(&product_service),
    ));
    tracing::info!("Cart service initialized");

    let admin_service = Arc::new(AdminService::new(
        Arc::new(PgAdminRepository::new(pool.clone())),
        Arc::clone(&product_service),
    ));
    tracing::info!("Admin service initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(build_router(AppServices {
            session_resolver,
            authorizer,
            auth: auth_service,
            profiles: profile_service,
            categories: category_service,
            products: product_service,
            collections: collection_service,
            cart: cart_service,
            admin: admin_service,
            renderer,
            session: config.session.clone(),
        }))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Storefront listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
