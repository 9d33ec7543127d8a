use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::domain::{Claims, Role};
use super::tokens::TokenAuthority;
use super::AuthError;
use crate::error::AppError;

/// Verified bearer-token caller. Requires an `Extension<Arc<TokenAuthority>>`
/// layer on the router.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub Claims);

impl AuthenticatedAdmin {
    pub fn require(&self, role: Role) -> Result<&Claims, AppError> {
        if self.0.role.satisfies(role) {
            Ok(&self.0)
        } else {
            Err(AuthError::InsufficientRole {
                required: role,
                actual: self.0.role,
            }
            .into())
        }
    }

    /// Display name used when stamping notes.
    pub fn author(&self) -> &str {
        &self.0.name
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authority = parts
            .extensions
            .get::<Arc<TokenAuthority>>()
            .cloned()
            .ok_or_else(|| AppError::Internal("token authority not installed".to_string()))?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = authority.verify(token)?;
        Ok(Self(claims))
    }
}
