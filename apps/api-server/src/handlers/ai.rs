//! AI writing assistance handlers.

use actix_web::{HttpResponse, web};

use journal_core::DomainError;
use journal_shared::dto::{EnhanceRequest, EnhanceResponse};

use crate::middleware::auth::Writer;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/ai/enhance
pub async fn enhance(
    state: web::Data<AppState>,
    _writer: Writer,
    body: web::Json<EnhanceRequest>,
) -> AppResult<HttpResponse> {
    let text = body
        .into_inner()
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Text is required".to_string()))?;

    let enhanced_text = state
        .enhancer
        .enhance(&text)
        .await
        .map_err(DomainError::from)?;

    Ok(HttpResponse::Ok().json(EnhanceResponse { enhanced_text }))
}
