use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::item_handler::{
    book_item_handler, create_item_handler, list_items_handler, return_item_handler,
    search_items_handler,
};
use crate::service::catalog_service::CatalogServiceImpl;

pub fn item_router(service: Arc<CatalogServiceImpl>) -> Router {
    Router::new()
        .route("/items", post(create_item_handler).get(list_items_handler))
        .route("/items/search", get(search_items_handler))
        .route("/items/:id/book", post(book_item_handler))
        .route("/items/:id/return", post(return_item_handler))
        .with_state(service)
}
