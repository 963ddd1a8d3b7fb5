use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    api, config, error,
    management::{FeatureService, SessionCodec},
    spotify::SpotifyClient,
    success, warning,
};

/// Shared handles for every route handler. Cloned per request; the inner
/// services are stateless apart from the feature cache.
#[derive(Clone)]
pub struct AppState {
    pub spotify: Arc<SpotifyClient>,
    pub features: Arc<FeatureService>,
    pub codec: Arc<SessionCodec>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn from_env() -> Self {
        AppState {
            spotify: Arc::new(SpotifyClient::from_env()),
            features: Arc::new(FeatureService::from_env()),
            codec: Arc::new(SessionCodec::new(&config::session_secret())),
            cookie_secure: config::cookie_secure(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(api::health))
        .route("/api/auth/login", get(api::auth::login))
        .route("/api/auth/callback", get(api::auth::callback))
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/session", get(api::auth::session))
        .route("/api/search", get(api::search::search))
        .route(
            "/api/playlists",
            get(api::playlists::list).post(api::playlists::create),
        )
        .route(
            "/api/playlists/{id}",
            get(api::playlists::detail)
                .put(api::playlists::update)
                .delete(api::playlists::remove_tracks),
        )
        .route(
            "/api/playlists/{id}/tracks",
            get(api::playlists::tracks)
                .post(api::playlists::add_tracks)
                .put(api::playlists::reorder_tracks)
                .delete(api::playlists::remove_tracks),
        )
        .route("/api/playlists/{id}/move", post(api::playlists::move_tracks))
        .route("/api/audio-features/batch", get(api::features::batch))
        .route("/api/audio-features/{track_id}", get(api::features::single))
        .route("/api/player/state", get(api::player::state))
        .route("/api/player/devices", get(api::player::devices))
        .route("/api/player/play", post(api::player::play))
        .route("/api/player/pause", post(api::player::pause))
        .route("/api/player/transfer", post(api::player::transfer))
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = config::ui_origin() {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                    .allow_headers([header::CONTENT_TYPE])
                    .allow_credentials(true);
                app = app.layer(cors);
            }
            Err(_) => warning!("Ignoring unparsable UI_ORIGIN value"),
        }
    }

    app.with_state(state)
}

pub async fn serve(state: AppState, address: &str) {
    let app = router(state);

    let addr = match SocketAddr::from_str(address) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    success!("Listening on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
