//! JWT extractors
//!
//! `AuthContext` accepts any valid token; `OwnerContext` and `AdminContext`
//! additionally require the matching role (403 otherwise).

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, ErrorCode};

use super::context::{AdminContext, AuthContext, OwnerContext};
use super::jwt::{JwtError, JwtService};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthContext>() {
            return Ok(ctx.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Missing authorization header");
                return Err(AppError::unauthorized());
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let ctx = AuthContext::from(claims);
                parts.extensions.insert(ctx.clone());
                Ok(ctx)
            }
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Token rejected");
                match e {
                    JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

impl FromRequestParts<ServerState> for OwnerContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match AuthContext::from_request_parts(parts, state).await? {
            AuthContext::Owner(owner) => Ok(owner),
            AuthContext::Admin(_) => Err(AppError::new(ErrorCode::OwnerRequired)),
        }
    }
}

impl FromRequestParts<ServerState> for AdminContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match AuthContext::from_request_parts(parts, state).await? {
            AuthContext::Admin(admin) => Ok(admin),
            AuthContext::Owner(owner) => {
                tracing::warn!(principal_id = %owner.principal_id, "Admin route denied");
                Err(AppError::new(ErrorCode::AdminRequired))
            }
        }
    }
}
