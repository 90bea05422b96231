use std::{sync::Arc, time::Duration};

use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Json, Router,
};
use log::{info, warn};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{
    error::StartupError,
    handlers::{
        analytics_handler::analytics_handler,
        item_handler::{create_item_handler, delete_item_handler, list_items_handler},
        quiz_handler::{answer_handler, highscore_handler, question_handler, reset_handler},
        user_handler::{create_user_handler, delete_user_handler, list_users_handler},
    },
    models::communication::Message,
    state::AppState,
};

pub const ANY_ORIGIN: &str = "*";

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root_handler))
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route("/items/:item_id", delete(delete_item_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/:user_id", delete(delete_user_handler))
        .route("/quiz/question", get(question_handler))
        .route("/quiz/answer", post(answer_handler))
        .route("/quiz/highscore", get(highscore_handler))
        .route("/quiz/reset", post(reset_handler))
        .route("/analytics", get(analytics_handler))
        .layer(cors)
        .with_state(state)
}

/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight instead of using a wildcard. `null` covers pages opened from disk.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == ANY_ORIGIN) {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

async fn root_handler() -> Json<Message> {
    Json(Message::new("Welcome to the multi-page app backend!"))
}

pub async fn start_server(state: Arc<AppState>) -> Result<(), StartupError> {
    let address = state.config.address();
    let app = build_router(state);

    info!("Binding to {}", address);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(error) => {
                warn!("Failed to install Ctrl+C handler: {}", error);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(error) => {
                warn!("Failed to install terminate handler: {}", error);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
