//! Post handlers.

use actix_web::{HttpResponse, web};

use journal_core::domain::{Post, PostChanges, PostDraft};
use journal_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::{OptionalWriter, Writer};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        excerpt: post.excerpt,
        category: post.category,
        read_time: post.read_time,
        date: post.date,
        is_private: post.is_private,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    viewer: OptionalWriter,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(viewer.visibility()).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    viewer: OptionalWriter,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get(path.into_inner(), viewer.visibility())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    _writer: Writer,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::debug!(content_chars = req.content.chars().count(), "Create post request");

    let draft = PostDraft {
        content: req.content,
        title: req.title,
        excerpt: req.excerpt,
        category: req.category,
        date: req.date,
    };
    let post = state.posts.create(draft).await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    _writer: Writer,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        category: req.category,
        read_time: req.read_time,
        date: req.date,
    };

    let post = state
        .posts
        .update(path.into_inner(), changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    _writer: Writer,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    if !state.posts.delete(path.into_inner()).await? {
        return Err(not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /api/posts/{id}/privacy
pub async fn toggle_privacy(
    state: web::Data<AppState>,
    _writer: Writer,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .toggle_privacy(path.into_inner())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}
