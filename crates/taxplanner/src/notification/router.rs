use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::gateway::EmailGateway;
use super::relay::NotificationRelay;
use super::request::NotificationRequest;
use crate::error::AppError;

pub const NOTIFICATIONS_PATH: &str = "/api/v1/notifications";

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type, \
x-supabase-client-platform, x-supabase-client-platform-version, \
x-supabase-client-runtime, x-supabase-client-runtime-version";

/// Fixed cross-origin policy attached to every relay response.
pub fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    ]
}

/// Router exposing the notification relay endpoint.
pub fn notification_router<G>(relay: Arc<NotificationRelay<G>>) -> Router
where
    G: EmailGateway + ?Sized + 'static,
{
    Router::new()
        .route(
            NOTIFICATIONS_PATH,
            post(notify_handler::<G>).options(preflight_handler),
        )
        .with_state(relay)
}

pub(crate) async fn preflight_handler() -> Response {
    (StatusCode::OK, cors_headers()).into_response()
}

pub(crate) async fn notify_handler<G>(
    State(relay): State<Arc<NotificationRelay<G>>>,
    body: Bytes,
) -> Response
where
    G: EmailGateway + ?Sized + 'static,
{
    let request = match serde_json::from_slice::<NotificationRequest>(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "rejecting malformed notification payload");
            return (cors_headers(), AppError::from(err)).into_response();
        }
    };

    match relay.relay(&request).await {
        Ok(receipt) => {
            let payload = json!({ "success": true, "id": receipt.id });
            (StatusCode::OK, cors_headers(), Json(payload)).into_response()
        }
        Err(err) => (cors_headers(), AppError::from(err)).into_response(),
    }
}
