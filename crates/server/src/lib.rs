//! Symposia API server
//!
//! The HTTP surface for the conference website:
//! - Paper submission, review statuses, full-text upload
//! - Announcements and registrations
//! - Login and user listing
//! - The editable site content document
//!
//! Handlers stay thin; record access goes through `ConferenceStore` and
//! uploaded files through `BlobStore`, both injected via [`AppState`].

pub mod handlers;
pub mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::{Arc, OnceLock};
use symposia_common::{config::AppConfig, metrics, BlobStore, ConferenceStore};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Transport-level body cap. Sits above the 10 MiB file rule so an
/// oversized upload reaches the handler and gets the 400 validation
/// error instead of a bare 413.
const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ConferenceStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub metrics: PrometheusHandle,
}

static PROMETHEUS: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register metric descriptions.
///
/// The recorder is process-global, so repeated calls (tests build many
/// apps in one process) return the same handle.
pub fn install_metrics() -> PrometheusHandle {
    PROMETHEUS
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .set_buckets_for_metric(
                    Matcher::Suffix("duration_seconds".to_string()),
                    metrics::LATENCY_BUCKETS,
                )
                .expect("failed to configure latency buckets")
                .install_recorder()
                .expect("failed to install metrics recorder");
            metrics::register_metrics();
            handle
        })
        .clone()
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Auth endpoints
        .route("/login", post(handlers::users::login))
        .route("/users", get(handlers::users::list_users))
        // Registration endpoints
        .route("/registrations", get(handlers::registrations::list_registrations))
        .route("/registrations", post(handlers::registrations::create_registration))
        // Announcement endpoints
        .route("/announcements", get(handlers::announcements::list_announcements))
        .route("/announcements", post(handlers::announcements::create_announcement))
        .route("/announcements/{id}", put(handlers::announcements::update_announcement))
        .route("/announcements/{id}", delete(handlers::announcements::delete_announcement))
        // Paper endpoints
        .route("/papers", get(handlers::papers::list_papers))
        .route("/papers", post(handlers::papers::create_paper))
        .route("/papers/{id}", get(handlers::papers::get_paper))
        .route("/papers/{id}", put(handlers::papers::update_paper))
        .route("/papers/{id}", delete(handlers::papers::delete_paper))
        .route("/papers/{id}/upload-fulltext", post(handlers::papers::upload_full_text))
        .route("/papers/{id}/delete-fulltext", delete(handlers::papers::delete_full_text))
        // Site content endpoints
        .route("/site-content", get(handlers::site_content::get_site_content))
        .route("/site-content", put(handlers::site_content::update_site_content));

    let mut app = Router::new()
        .nest("/api", api_routes)
        // Operational endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics));

    // The disk blob backend serves uploaded files straight from its root
    if state.config.blob.backend == "disk" {
        app = app.nest_service("/uploads", ServeDir::new(&state.config.blob.root));
    }

    // Compose the app
    app.layer(axum::middleware::from_fn(middleware::track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}
