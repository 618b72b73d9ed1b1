use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection}},
};
use tracing::{debug, info};

use crate::{
    AppState,
    error::AppResult,
    models::{
        AllParams, Ack, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ListParams, ListResponse, ListSort,
        MovieDto, MovieInput, MovieResponse, PaginatedEnvelope, SearchParams, non_empty,
        parse_count, parse_direction, parse_rating_filter,
    },
    query::{MovieQuery, NameFilter, SortField},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Json(input) = body?;
    let movie = state.catalog.create(input).await?;
    info!(id = movie.id, name = %movie.name, "movie created");

    Ok(Json(Ack::new("Movie inserted successfully").with_movie(movie.into())))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse>> {
    let page = parse_count(params.page.as_deref(), DEFAULT_PAGE);
    let per_page = parse_count(params.per_page.as_deref(), DEFAULT_PAGE_SIZE)
        .min(state.config.max_page_size);

    // sortBy is parsed and logged only; the listing is most recently updated first.
    let requested = ListSort::from_param(params.sort_by.as_deref());
    debug!(?requested, "sortBy not applied to default listing");

    let mut query = MovieQuery::new(page, per_page);
    if let Some(needle) = non_empty(params.filter_by_name.as_deref()) {
        query = query.name(NameFilter::IgnoreCase(needle.to_string()));
    }

    let page = state.catalog.page(&query).await?;
    Ok(Json(ListResponse {
        movies: page.movies.into_iter().map(MovieDto::from).collect(),
        total_movies: page.total,
    }))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<PaginatedEnvelope>> {
    let page = parse_count(params.page.as_deref(), DEFAULT_PAGE);
    let limit =
        parse_count(params.limit.as_deref(), DEFAULT_PAGE_SIZE).min(state.config.max_page_size);

    let mut query = MovieQuery::new(page, limit);
    if let Some(needle) = non_empty(params.search.as_deref()) {
        query = query.name(NameFilter::Collation(needle.to_string()));
    }
    if let Some(direction) = parse_direction(params.rating_sort.as_deref())? {
        query = query.order_by(SortField::Rating, direction);
    }
    // ratingFilter is part of the public query string here but only /all filters on it.
    if let Some(ignored) = non_empty(params.rating_filter.as_deref()) {
        debug!(rating_filter = ignored, "ratingFilter not applied to search");
    }

    let result = state.catalog.page(&query).await?;
    Ok(Json(result.into_paginated(&query)))
}

pub async fn all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AllParams>,
) -> AppResult<Json<PaginatedEnvelope>> {
    let page = parse_count(params.page.as_deref(), DEFAULT_PAGE);
    let limit =
        parse_count(params.limit.as_deref(), DEFAULT_PAGE_SIZE).min(state.config.max_page_size);

    let mut query = MovieQuery::new(page, limit);
    if let Some(direction) = parse_direction(params.rating_sort.as_deref())? {
        query = query.order_by(SortField::Rating, direction);
    }
    if let Some(rating) = parse_rating_filter(params.rating_filter.as_deref())? {
        query = query.rating(rating);
    }

    let result = state.catalog.page(&query).await?;
    Ok(Json(result.into_paginated(&query)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<MovieResponse>> {
    let Path(id) = id?;
    let movie = state.catalog.get(id).await?;
    Ok(Json(MovieResponse { success: true, movie: movie.into() }))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let Path(id) = id?;
    let Json(input) = body?;
    state.catalog.update(id, input).await?;
    info!(id, "movie updated");

    Ok(Json(Ack::new("movie has been updated")))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Ack>> {
    let Path(id) = id?;
    state.catalog.delete(id).await?;
    info!(id, "movie deleted");

    Ok(Json(Ack::new("Movie deleted successfully")))
}
