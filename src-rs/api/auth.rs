use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::server::AppState;

/// Rejects the request before any extractor runs unless it carries `Bearer <API_TOKEN>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if !token_matches(&state.api_token, provided) {
        warn!(path = %req.uri().path(), "rejected request with missing or invalid token");
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}

fn token_matches(expected: &str, header: Option<&str>) -> bool {
    if expected.is_empty() {
        return false;
    }
    match header.and_then(|value| value.strip_prefix("Bearer ")) {
        Some(token) => token == expected,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::token_matches;

    #[test]
    fn accepts_exact_bearer_token() {
        assert!(token_matches("secret", Some("Bearer secret")));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!token_matches("secret", None));
        assert!(!token_matches("secret", Some("secret")));
        assert!(!token_matches("secret", Some("Bearer secret2")));
        assert!(!token_matches("secret", Some("bearer secret")));
        assert!(!token_matches("", Some("Bearer ")));
    }
}
