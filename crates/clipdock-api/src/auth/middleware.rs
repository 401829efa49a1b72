//! Bearer-token authentication middleware.
//!
//! Resolves the caller identity from an `Authorization: Bearer <jwt>` header
//! (HS256) and stores it in request extensions for the `CurrentUser`
//! extractor. Token issuance happens elsewhere; this service only validates.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use clipdock_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::auth::models::{CurrentUser, JwtClaims};
use crate::error::HttpAppError;

#[derive(Clone)]
pub struct AuthState {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthState {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Resolve the caller identity from an Authorization header value.
    pub fn resolve_identity(&self, auth_header: Option<&str>) -> Result<CurrentUser, AppError> {
        let header = auth_header.ok_or_else(|| {
            AppError::Unauthenticated("missing authorization header".to_string())
        })?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthenticated("invalid authorization header format".to_string())
        })?;

        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                AppError::Unauthenticated("invalid or expired token".to_string())
            })?;

        Ok(CurrentUser {
            user_id: data.claims.sub,
        })
    }
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    match auth_state.resolve_identity(auth_header) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => HttpAppError(err).into_response(),
    }
}
