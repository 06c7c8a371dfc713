use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Envelope, ListQuery, Movie, Page, Pagination},
    validation::{self, ValidationError},
};

const NOT_FOUND: &str = "Movie not found";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/movies", get(list_movies).post(create_movie))
        .route("/api/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .with_state(state)
}

pub async fn index() -> Json<Envelope<()>> {
    Json(Envelope::message("Movies API is running"))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Envelope<Movie>>)> {
    let body = json_body(payload)?;
    let new = validation::validate_create(&body)?;
    let created = state.store.create(new).await?;

    Ok((StatusCode::CREATED, Json(Envelope::with_data("Movie added", Movie::try_from(created)?))))
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<Movie>>> {
    let query = ListQuery::from_pairs(pairs);
    let pagination = Pagination::from_query(&query, state.config.max_page_limit);
    let (rows, total) = state.store.list(pagination).await?;
    let data = rows.into_iter().map(Movie::try_from).collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Page::new(pagination, total, data)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Movie>>> {
    let id = parse_id(&id)?;
    let movie = state.store.get(id).await?.ok_or(AppError::NotFound(NOT_FOUND))?;

    Ok(Json(Envelope::with_data("Movie found", Movie::try_from(movie)?)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Envelope<()>>> {
    let body = json_body(payload)?;
    let patch = validation::validate_update(&body)?;
    let id = parse_id(&id)?;

    if !state.store.update(id, patch).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }
    Ok(Json(Envelope::message("Movie updated")))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<()>>> {
    let id = parse_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }
    Ok(Json(Envelope::message("Movie deleted")))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationError> {
    payload.map(|Json(body)| body).map_err(|err| ValidationError::Malformed(err.body_text()))
}

/// Ids that cannot name a row are reported as missing rather than malformed.
fn parse_id(raw: &str) -> AppResult<u32> {
    match raw.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::NotFound(NOT_FOUND)),
    }
}
