use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};

/// Helper to extract and validate the user, then insert it into the request extensions.
async fn extract_and_insert_authuser(req: Request<Body>) -> Result<Request<Body>, ApiResponse<Empty>> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|(_, reason)| {
            tracing::debug!(reason, path = %parts.uri.path(), "Rejected unauthenticated request");
            ApiResponse::error(StatusCode::UNAUTHORIZED, "Authentication required")
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    Ok(req)
}

/// Basic guard to ensure the request is authenticated.
///
/// Capability checks happen in the handlers, which know which capability applies.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, ApiResponse<Empty>> {
    let req = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}
