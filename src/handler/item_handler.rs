use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::item_dto::{BookItemRequest, CreateItemRequest, SearchQuery};
use crate::model::item::ItemFilter;
use crate::service::catalog_service::{CatalogService, CatalogServiceImpl};
use crate::util::error::HandlerError;

fn parse_item_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid item id"))
}

// Add item
pub async fn create_item_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.add_item(payload).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

// List items with optional filters
pub async fn list_items_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Query(filter): Query<ItemFilter>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_items(filter).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

// Search items by title
pub async fn search_items_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Query(search): Query<SearchQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    // An absent query matches everything, same as an empty one.
    let query = search.q.unwrap_or_default();
    let res = service
        .search_items(&query)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}

// Book item
pub async fn book_item_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<BookItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let id = parse_item_id(&id)?;
    let res = service
        .book_item(id, &payload.start_date, &payload.end_date)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}

// Return item
pub async fn return_item_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_item_id(&id)?;
    let res = service.return_item(id).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}
