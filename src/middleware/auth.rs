use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::access::Principal;
use crate::app_state::AppState;
use crate::db::AccountRepository;
use crate::error::AppError;

/// Resolve the bearer token to a [`Principal`] and stash it in the request
/// extensions. Everything behind this middleware gets an authenticated
/// `{account_id, role}` pair; the token itself goes no further. A missing
/// or unknown token is `Unauthenticated`, never a defaulted role.
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Authentication("missing bearer token".to_string()))?
        .to_string();

    let account = AccountRepository::resolve_token(&state.db, &token)
        .await?
        .ok_or_else(|| AppError::Authentication("unknown token".to_string()))?;

    request.extensions_mut().insert(Principal {
        account_id: account.id,
        role: account.role,
    });
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().copied().ok_or_else(|| {
            AppError::Authentication("request reached a protected handler unauthenticated".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_requires_the_scheme_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.remove(header::AUTHORIZATION);
        assert_eq!(bearer_token(&headers), None);
    }
}
