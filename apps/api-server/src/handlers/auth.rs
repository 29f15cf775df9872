//! Writer session handlers.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};

use journal_shared::dto::{AuthStatusResponse, LoginRequest};

use crate::middleware::auth::{AUTH_COOKIE, OptionalWriter};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if !state.passwords.verify(&req.password)? {
        tracing::warn!("Rejected writer login");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    let token = state.sessions.issue()?;
    let cookie = session_cookie(
        token,
        state.sessions.expiration_seconds(),
        state.secure_cookies,
    );

    tracing::info!("Writer signed in");
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(AuthStatusResponse { authenticated: true }))
}

/// GET /api/auth/status
pub async fn status(viewer: OptionalWriter) -> HttpResponse {
    HttpResponse::Ok().json(AuthStatusResponse {
        authenticated: viewer.is_writer(),
    })
}

/// POST /api/auth/logout
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(AuthStatusResponse {
            authenticated: false,
        })
}
