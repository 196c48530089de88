use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::comments::CommentService;
use crate::app::posts::PostService;
use crate::domain::comment::Comment;
use crate::domain::post::{Post, PostFields};
use crate::http::AppError;
use crate::AppState;

const POST_NOT_FOUND: &str = "Post not found";

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.db.ping().await.is_ok() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse { status })
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let service = PostService::new(state.db.clone());
    let posts = service.list_posts().await.map_err(|err| {
        tracing::error!(error = ?err, "failed to fetch posts");
        AppError::from(err)
    })?;

    Ok(Json(posts))
}

pub async fn get_post(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    let service = PostService::new(state.db.clone());
    let post = service.get_by_slug(&slug).await.map_err(|err| {
        tracing::error!(error = ?err, slug = %slug, "failed to fetch post");
        AppError::from(err)
    })?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::not_found(POST_NOT_FOUND)),
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<PostFields>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let service = PostService::new(state.db.clone());
    let post = service.create_post(payload).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to save post");
        AppError::from(err)
    })?;

    tracing::info!(post_id = %post.id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<PostFields>,
) -> Result<Json<Post>, AppError> {
    let service = PostService::new(state.db.clone());
    let post = service.update_post(&id, payload).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to update post");
        AppError::from(err)
    })?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::not_found(POST_NOT_FOUND)),
    }
}

pub async fn delete_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = PostService::new(state.db.clone());
    let deleted = service.delete_post(&id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to delete post");
        AppError::from(err)
    })?;

    if deleted {
        Ok(Json(MessageResponse {
            message: "Post deleted successfully",
        }))
    } else {
        Err(AppError::not_found(POST_NOT_FOUND))
    }
}

pub async fn like_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = PostService::new(state.db.clone());
    let affected = service.like_post(&id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to like post");
        AppError::from(err)
    })?;

    if affected == 0 {
        tracing::debug!(post_id = %id, "like matched no post");
    }

    Ok(Json(MessageResponse {
        message: "Like added",
    }))
}

pub async fn list_post_comments(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let service = CommentService::new(state.db.clone());
    let comments = service.list_comments(&id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to fetch comments");
        AppError::from(err)
    })?;

    Ok(Json(comments))
}

#[derive(Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

pub async fn comment_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<CommentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let service = CommentService::new(state.db.clone());
    let comment_id = service
        .add_comment(&id, payload.name, payload.comment)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, post_id = %id, "failed to add comment");
            AppError::from(err)
        })?;

    tracing::info!(post_id = %id, comment_id = %comment_id, "comment added");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Comment added",
        }),
    ))
}
