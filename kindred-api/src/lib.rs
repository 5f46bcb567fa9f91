pub mod assessment;
pub mod config;
pub mod matching;
pub mod models;
pub mod providers;
pub mod realtime;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use socketioxide::SocketIo;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use providers::{FaceVerifier, PaymentProvider};
use realtime::PresenceRegistry;
use store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: AppConfig,
    pub face: FaceVerifier,
    pub payment: PaymentProvider,
    pub io: SocketIo,
    pub presence: PresenceRegistry,
    pub metrics_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
}

/// Build the full application: REST surface, Socket.IO side-channel,
/// observability layers. Integration tests call this with a memory store
/// and drive the router directly.
pub fn build_app(
    config: AppConfig,
    store: Arc<dyn Store>,
    metrics_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> Router {
    let (sio_layer, io) = SocketIo::builder().build_layer();

    let face = FaceVerifier::from_config(
        &config.face_provider,
        &config.face_api_url,
        &config.face_api_key,
    );
    let payment = PaymentProvider::from_config(
        &config.payment_provider,
        &config.payment_api_url,
        &config.payment_secret_key,
    );

    let state = Arc::new(AppState {
        store,
        config,
        face,
        payment,
        io: io.clone(),
        presence: PresenceRegistry::new(),
        metrics_handle,
    });

    io.ns("/", {
        let state = state.clone();
        move |socket: socketioxide::extract::SocketRef| {
            let state = state.clone();
            async move {
                realtime::handlers::on_connect(socket, state).await;
            }
        }
    });

    let api = Router::new()
        // Auth
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/verify-face", post(routes::auth::verify_face))
        // Assessments
        .route("/assessment/questions/:test_type", get(routes::assessment::get_questions))
        .route("/assessment/submit", post(routes::assessment::submit))
        .route("/assessment/status", get(routes::assessment::status))
        // Discovery and matching
        .route("/discover", get(routes::discover::discover))
        .route("/like", post(routes::likes::like_user))
        .route("/matches", get(routes::likes::get_matches))
        // Chat
        .route(
            "/chat/:match_id/messages",
            get(routes::chat::get_messages).post(routes::chat::send_message),
        )
        // Feeds
        .route("/feeds", get(routes::feeds::get_feeds).post(routes::feeds::create_feed))
        // Profiles
        .route("/profile", get(routes::profile::get_profile))
        .route("/profile/:user_id", get(routes::profile::get_user_profile))
        // Moderation
        .route("/report", post(routes::moderation::report))
        .route("/block/:user_id", post(routes::moderation::block_user))
        // Consultations
        .route("/consultations", get(routes::consultations::list_counselors))
        .route("/consultations/book", post(routes::consultations::book_consultation));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .nest("/api", api)
        .layer(sio_layer)
        .layer(axum::middleware::from_fn(kindred_shared::middleware::metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
