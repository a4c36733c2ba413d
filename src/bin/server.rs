use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use shelterd::api;
use shelterd::auth::JwtKeys;
use shelterd::config::Config;
use shelterd::email::Mailer;
use shelterd::migrator::Migrator;
use shelterd::services;
use shelterd::storage::BlobStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (dotenvy)
    dotenvy::dotenv().ok();

    shelterd::telemetry::init_telemetry();

    let config = Arc::new(Config::from_env()?);

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if let Some(admin) = services::account::bootstrap_admin(&db, email, password).await? {
            tracing::info!(user_id = admin.id, "created initial admin user");
        }
    }

    shelterd::metrics::init_metrics(&db).await;

    let keys = Arc::new(JwtKeys::new(
        &config.jwt_secret,
        config.access_token_ttl_minutes,
    ));
    let mailer = Arc::new(Mailer::new(
        config.smtp.as_ref(),
        config.public_base_url.clone(),
    )?);

    let blob_store = match config.gcs_bucket.clone() {
        Some(bucket) => Some(Arc::new(BlobStore::connect(bucket).await?)),
        None => {
            tracing::warn!("GCS_BUCKET_NAME not set, media endpoints are unavailable");
            None
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = app(
        db,
        config,
        keys,
        mailer,
        blob_store,
        prometheus_layer,
        metric_handle,
    );

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

fn app(
    db: DatabaseConnection,
    config: Arc<Config>,
    keys: Arc<JwtKeys>,
    mailer: Arc<Mailer>,
    blob_store: Option<Arc<BlobStore>>,
    prometheus_layer: axum_prometheus::PrometheusMetricLayer<'static>,
    metric_handle: metrics_exporter_prometheus::PrometheusHandle,
) -> Router {
    // Tight window on the credential endpoints, a looser one on the rest.
    let auth_limiter = api::rate_limit::FixedWindow::new(10, Duration::from_secs(60));
    let api_limiter = api::rate_limit::FixedWindow::new(300, Duration::from_secs(60));

    let auth_routes = Router::new()
        .route("/login", post(api::auth::login))
        .route("/refresh-token", post(api::auth::refresh_token))
        .route("/forgot-password", post(api::auth::forgot_password))
        .route("/reset-password", post(api::auth::reset_password))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_limiter,
            api::rate_limit::limit,
        ));

    let admin_routes = Router::new()
        .route("/register", post(api::auth::register))
        .route("/v1/users/:id", delete(api::users::delete_user))
        .route(
            "/v1/configuration",
            put(api::configuration::update_configuration),
        )
        .route_layer(axum::middleware::from_fn(api::middleware::require_admin));

    let protected_routes = Router::new()
        .route("/change-password", post(api::auth::change_password))
        .route("/v1/users", get(api::users::list_users))
        .route("/v1/users/me", get(api::users::me))
        .route("/v1/users/:id", get(api::users::get_user))
        .route(
            "/v1/configuration",
            get(api::configuration::get_configuration),
        )
        .route(
            "/v1/animals",
            get(api::animals::list_animals).post(api::animals::create_animal),
        )
        .route(
            "/v1/animals/:id",
            get(api::animals::get_animal)
                .put(api::animals::update_animal)
                .delete(api::animals::delete_animal),
        )
        .route(
            "/v1/animals/:id/image",
            get(api::animals::get_image).post(api::animals::upload_image),
        )
        .route(
            "/v1/animals/:id/attachments",
            get(api::animals::list_attachments).post(api::animals::upload_attachment),
        )
        .route(
            "/v1/animals/:id/attachments/:filename",
            get(api::animals::download_attachment),
        )
        .route(
            "/v1/animals/:id/daily-tasks",
            get(api::daily_tasks::get_daily_task),
        )
        .route(
            "/v1/animals/:id/daily-tasks/entries",
            post(api::daily_tasks::add_entry),
        )
        .route(
            "/v1/animals/:id/daily-tasks/default-entries",
            get(api::daily_tasks::list_default_entries)
                .post(api::daily_tasks::create_default_entry),
        )
        .route(
            "/v1/daily-task-entries/:id",
            delete(api::daily_tasks::remove_entry),
        )
        .route(
            "/v1/daily-task-entries/:id/complete",
            post(api::daily_tasks::complete_entry),
        )
        .route(
            "/v1/daily-task-default-entries/:id",
            put(api::daily_tasks::update_default_entry)
                .delete(api::daily_tasks::delete_default_entry),
        )
        .route(
            "/v1/species",
            get(api::species::list_species).post(api::species::create_species),
        )
        .route(
            "/v1/species/:id",
            get(api::species::get_species)
                .put(api::species::update_species)
                .delete(api::species::delete_species),
        )
        .route(
            "/v1/species/:id/breeds",
            get(api::species::list_breeds).post(api::species::create_breed),
        )
        .route(
            "/v1/species/:id/breeds/:breed_id",
            get(api::species::get_breed)
                .put(api::species::update_breed)
                .delete(api::species::delete_breed),
        )
        .route(
            "/v1/adoptions",
            get(api::adoptions::list_adoptions).post(api::adoptions::create_adoption),
        )
        .route(
            "/v1/adoptions/:id",
            get(api::adoptions::get_adoption).delete(api::adoptions::delete_adoption),
        )
        .route(
            "/v1/adoptions/:id/status",
            post(api::adoptions::update_adoption_status),
        )
        .route(
            "/v1/adoptions/:id/agreement",
            get(api::adoptions::adoption_agreement),
        )
        .route(
            "/v1/events",
            get(api::events::list_events).post(api::events::create_event),
        )
        .route(
            "/v1/events/:id",
            get(api::events::get_event)
                .put(api::events::update_event)
                .delete(api::events::delete_event),
        )
        .route("/v1/events/:id/end", post(api::events::end_event))
        .merge(admin_routes)
        .route_layer(axum::middleware::from_fn(api::middleware::auth_middleware))
        .route_layer(axum::middleware::from_fn_with_state(
            api_limiter,
            api::rate_limit::limit,
        ));

    let cors_origin = config
        .cors_origin
        .parse::<axum::http::HeaderValue>()
        .expect("CORS_ORIGIN is not a valid header value");

    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(Extension(db))
        .layer(Extension(config))
        .layer(Extension(keys))
        .layer(Extension(mailer));

    if let Some(store) = blob_store {
        router = router.layer(Extension(store));
    }

    router
        .layer(prometheus_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str().to_string());
                    let route = matched_path
                        .unwrap_or_else(|| request.uri().path().to_string());

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        route = %route,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(
                    |_request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {},
                )
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ]),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(axum::extract::DefaultBodyLimit::max(25 * 1024 * 1024))
}
