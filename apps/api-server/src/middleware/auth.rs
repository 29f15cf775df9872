//! Writer session extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use journal_core::domain::Visibility;
use journal_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the writer's session token.
pub const AUTH_COOKIE: &str = "writer_auth";

/// Proof that the request carries a valid writer session.
///
/// Use this in handlers that only the writer may call:
/// ```ignore
/// async fn delete_post(_writer: Writer, path: web::Path<i32>) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Writer;

fn authenticate(req: &HttpRequest) -> Result<Writer, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let cookie = req.cookie(AUTH_COOKIE).ok_or(AuthError::MissingAuth)?;
    let claims = state.sessions.validate(cookie.value())?;
    tracing::trace!(subject = %claims.subject, expires_at = claims.exp, "Writer session accepted");
    Ok(Writer)
}

impl FromRequest for Writer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(|e| {
            tracing::debug!(error = %e, "Writer authentication failed");
            AppError::Unauthorized(e.to_string())
        }))
    }
}

/// Optional writer extractor - doesn't fail if not authenticated.
pub struct OptionalWriter(pub Option<Writer>);

impl OptionalWriter {
    pub fn is_writer(&self) -> bool {
        self.0.is_some()
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::for_writer(self.is_writer())
    }
}

impl FromRequest for OptionalWriter {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalWriter(authenticate(req).ok())))
    }
}
