use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_http::error::AppError;

use super::{
    models::{Book, BookFilter, BookInput, DeleteConfirmation},
    service::CatalogService,
};

/// Routes of the books module, relative to its mount point.
pub fn router(service: CatalogService) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/genres", get(list_genres))
        .route("/genres/suggested", get(suggested_genres))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(service)
}

async fn list_books(
    State(service): State<CatalogService>,
    query: Result<Query<BookFilter>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(filter) = query?;
    Ok(Json(service.list(&filter).await?))
}

async fn list_genres(State(service): State<CatalogService>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(service.distinct_genres().await?))
}

async fn suggested_genres(State(service): State<CatalogService>) -> Json<&'static [&'static str]> {
    Json(service.suggested_genres())
}

/// Liveness of the module including its store
async fn health_check(State(service): State<CatalogService>) -> Result<&'static str, AppError> {
    service.health().await?;
    Ok("books module is healthy")
}

async fn get_book(
    State(service): State<CatalogService>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(service.get(&id).await?))
}

async fn create_book(
    State(service): State<CatalogService>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(input) = payload?;
    let book = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(service): State<CatalogService>,
    Path(id): Path<String>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(input) = payload?;
    Ok(Json(service.update(&id, input).await?))
}

async fn delete_book(
    State(service): State<CatalogService>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    service.delete(&id).await?;
    Ok(Json(DeleteConfirmation {
        message: "book deleted".to_string(),
    }))
}
