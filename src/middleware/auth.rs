//! Authentication middleware
//!
//! Extractors for JWT token verification and customer identification.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{verify_token, AuthService, JwtError};
use crate::error::ApiError;
use crate::models::CustomerRole;

/// Authenticated customer extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: CustomerRole,
    pub jti: String,
}

impl AuthenticatedUser {
    /// Owners may act on their own record; moderators and admins on any record
    pub fn can_access(&self, customer_id: &str) -> bool {
        self.username == customer_id || self.role.is_staff()
    }

    pub fn authorize(&self, customer_id: &str) -> Result<(), ApiError> {
        if self.can_access(customer_id) {
            return Ok(());
        }

        tracing::warn!(
            username = %self.username,
            customer_id = %customer_id,
            jti = %self.jti,
            "Denied access to another customer's record"
        );
        Err(ApiError::Forbidden(format!(
            "Not allowed to access customer '{}'",
            customer_id
        )))
    }
}

/// Error response for authentication failures
#[derive(Debug, Serialize)]
struct AuthRejection {
    #[serde(skip)]
    status: StatusCode,
    error: AuthRejectionDetails,
}

#[derive(Debug, Serialize)]
struct AuthRejectionDetails {
    code: String,
    message: String,
}

impl AuthRejection {
    fn new(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: AuthRejectionDetails {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            ..Self::new("FORBIDDEN", message)
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        if self.status == StatusCode::UNAUTHORIZED {
            (
                self.status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(self),
            )
                .into_response()
        } else {
            (self.status, Json(self)).into_response()
        }
    }
}

/// Extractor for authenticated customers
///
/// Verifies the JWT token from the Authorization header.
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("Hello, {}", user.username)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AuthRejection::new(
                        "MISSING_TOKEN",
                        "Authorization header with Bearer token required",
                    )
                    .into_response()
                })?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        let claims = verify_token(bearer.token(), auth_service.jwt_secret()).map_err(|e| {
            let (code, message) = match e {
                JwtError::TokenExpired => ("TOKEN_EXPIRED", "Token has expired"),
                _ => ("INVALID_TOKEN", "Invalid token"),
            };
            tracing::debug!(error = %e, code = code, "Rejected bearer token");
            AuthRejection::new(code, message).into_response()
        })?;

        let role = claims.role().map_err(|_| {
            AuthRejection::new("INVALID_TOKEN", "Invalid role in token").into_response()
        })?;

        Ok(AuthenticatedUser {
            username: claims.sub,
            role,
            jti: claims.jti,
        })
    }
}

/// Extractor requiring a moderator or admin
pub struct StaffUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for StaffUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.role.is_staff() {
            tracing::warn!(
                username = %user.username,
                jti = %user.jti,
                "Denied staff-only route"
            );
            return Err(AuthRejection::forbidden("Moderator or admin access required").into_response());
        }

        Ok(StaffUser(user))
    }
}
