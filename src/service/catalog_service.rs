use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::dto::item_dto::CreateItemRequest;
use crate::model::item::{Item, ItemFilter};
use crate::repository::item_repo::ItemRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn add_item(&self, request: CreateItemRequest) -> Result<Item, ServiceError>;
    async fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>, ServiceError>;
    async fn search_items(&self, query: &str) -> Result<Vec<Item>, ServiceError>;
    async fn book_item(
        &self,
        id: ObjectId,
        start_date: &str,
        end_date: &str,
    ) -> Result<Item, ServiceError>;
    async fn return_item(&self, id: ObjectId) -> Result<Item, ServiceError>;
}

pub struct CatalogServiceImpl {
    pub item_repo: Arc<dyn ItemRepository>,
}

impl CatalogServiceImpl {
    pub fn new(item_repo: Arc<dyn ItemRepository>) -> Self {
        Self { item_repo }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    #[instrument(skip(self, request), fields(title = %request.title, owner = %request.owner_email))]
    async fn add_item(&self, request: CreateItemRequest) -> Result<Item, ServiceError> {
        info!("Adding new item");
        if request.title.trim().is_empty()
            || request.category.trim().is_empty()
            || request.owner_email.trim().is_empty()
        {
            return Err(ServiceError::InvalidInput(
                "Title, category and owner email are required".to_string(),
            ));
        }

        let item = Item {
            id: None,
            title: request.title,
            description: request.description,
            pricePerDay: request.price_per_day,
            category: request.category,
            imageUrl: request.image_url,
            available: true,
            ownerEmail: request.owner_email,
            rentedFrom: None,
            rentedTill: None,
            createdAt: None,
        };
        let inserted = self.item_repo.create(item).await;
        match &inserted {
            Ok(_) => info!("Item added successfully"),
            Err(e) => error!("Failed to add item: {e}"),
        }
        Ok(inserted?)
    }

    #[instrument(skip(self, filter))]
    async fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>, ServiceError> {
        info!("Listing items");
        let items = self.item_repo.list(&filter).await?;
        Ok(items)
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search_items(&self, query: &str) -> Result<Vec<Item>, ServiceError> {
        info!("Searching items by title");
        let items = self.item_repo.search_title(query).await?;
        Ok(items)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn book_item(
        &self,
        id: ObjectId,
        start_date: &str,
        end_date: &str,
    ) -> Result<Item, ServiceError> {
        info!("Booking item");
        let item = self.item_repo.get_by_id(id).await?;
        if !item.available {
            error!("Item already rented");
            return Err(ServiceError::Conflict("Item already rented".to_string()));
        }

        // The availability check above and the write below are separate
        // round trips; two concurrent bookings can both pass the check.
        let booked = self.item_repo.mark_rented(id, start_date, end_date).await?;
        info!("Item booked successfully");
        Ok(booked)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn return_item(&self, id: ObjectId) -> Result<Item, ServiceError> {
        info!("Returning item");
        // No rented-state guard: returning an already-available item is a
        // no-op success.
        let returned = self.item_repo.mark_returned(id).await?;
        info!("Item returned successfully");
        Ok(returned)
    }
}
