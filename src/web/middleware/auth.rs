use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::attendance_api_models::RejectionBody;
use crate::services::admin_auth_service;
use crate::web::AppState;

/// The administrator identity injected into request extensions once the
/// bearer token checks out.
#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub username: String,
}

/// Guard for the admin routes: requires a valid `Authorization: Bearer`
/// access token signed with the configured secret.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = token {
        if let Ok(claims) = admin_auth_service::decode_token(&state.settings, token) {
            request.extensions_mut().insert(AuthenticatedAdmin {
                username: claims.sub,
            });
            return next.run(request).await;
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(RejectionBody {
            detail: "invalid or missing access token".to_string(),
            distance_meters: None,
        }),
    )
        .into_response()
}
