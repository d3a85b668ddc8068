use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Movie, PageWindow, Section, SectionId, SectionWithMovies},
};

const MAX_PAGE_SIZE: u64 = 100;

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct SectionsQuery {
    #[serde(default)]
    include_inactive: bool,
}

pub async fn list_sections(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SectionsQuery>,
) -> AppResult<Json<Vec<Section>>> {
    let sections = state.resolver.list_sections(q.include_inactive).await?;
    Ok(Json(sections))
}

pub async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SectionId>,
) -> AppResult<Json<Section>> {
    Ok(Json(state.resolver.get_section(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    limit: Option<u64>,
    offset: Option<u64>,
}

pub async fn section_movies(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SectionId>,
    Query(q): Query<PageQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let limit = checked_limit(q.limit.unwrap_or(state.config.first_page_size))?;
    let window = PageWindow::new(limit, q.offset.unwrap_or(0));

    let movies = state.resolver.section_movies_by_id(id, window).await?;
    Ok(Json(movies))
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    limit: Option<u64>,
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RecommendationsQuery>,
) -> AppResult<Json<Vec<SectionWithMovies>>> {
    let limit = checked_limit(q.limit.unwrap_or(state.config.first_page_size))?;
    let sections = state.resolver.list_sections_with_movies(limit).await?;
    Ok(Json(sections))
}

fn checked_limit(limit: u64) -> AppResult<u64> {
    if limit > MAX_PAGE_SIZE {
        return Err(AppError::bad_request(format!("limit must be at most {MAX_PAGE_SIZE}")));
    }
    Ok(limit)
}
