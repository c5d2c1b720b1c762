use crate::model::item::{Item, ItemFilter};
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, item: Item) -> RepositoryResult<Item>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Item>;
    async fn list(&self, filter: &ItemFilter) -> RepositoryResult<Vec<Item>>;
    async fn search_title(&self, query: &str) -> RepositoryResult<Vec<Item>>;
    async fn mark_rented(&self, id: ObjectId, from: &str, till: &str) -> RepositoryResult<Item>;
    async fn mark_returned(&self, id: ObjectId) -> RepositoryResult<Item>;
}

pub struct MongoItemRepository {
    collection: mongodb::Collection<Item>,
}

impl MongoItemRepository {
    pub fn new(store: &MongoStore, collection_name: &str) -> Self {
        MongoItemRepository {
            collection: store.collection::<Item>(collection_name),
        }
    }

    async fn find_all(&self, query: Document) -> RepositoryResult<Vec<Item>> {
        let cursor = self.collection.find(query, None).await;
        match cursor {
            Ok(mut cursor) => {
                let mut items = Vec::new();
                while let Some(item) = cursor.next().await {
                    match item {
                        Ok(i) => items.push(i),
                        Err(e) => {
                            error!("Failed to deserialize item: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize item: {}",
                                e
                            )));
                        }
                    }
                }
                Ok(items)
            }
            Err(e) => {
                error!("Failed to query items: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to query items: {}",
                    e
                )))
            }
        }
    }
}

/// Translate a listing filter into a MongoDB query document. Every supplied
/// field becomes one clause of the conjunction; price bounds are inclusive.
pub fn filter_query(filter: &ItemFilter) -> Document {
    let mut query = Document::new();
    if let Some(ref category) = filter.category {
        query.insert("category", category.clone());
    }
    let mut price = Document::new();
    if let Some(min) = filter.min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = filter.max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        query.insert("pricePerDay", price);
    }
    if let Some(available) = filter.available {
        query.insert("available", available);
    }
    if let Some(ref owner) = filter.owner_email {
        query.insert("ownerEmail", owner.clone());
    }
    query
}

/// Case-insensitive title match. An empty query matches every title, which
/// is the documented behavior of the search endpoint.
pub fn title_search_query(query: &str) -> Document {
    doc! { "title": { "$regex": query, "$options": "i" } }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[tracing::instrument(skip(self, item), fields(title = %item.title, owner = %item.ownerEmail))]
    async fn create(&self, item: Item) -> RepositoryResult<Item> {
        let mut new_item = item;
        new_item.id = Some(ObjectId::new());
        new_item.createdAt = Some(chrono::Local::now().to_rfc3339());

        let result = self.collection.insert_one(new_item.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Item created successfully");
                Ok(new_item)
            }
            Err(e) => {
                error!("Failed to create item: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create item: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Item> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(item)) => Ok(item),
            Ok(None) => {
                error!("Item not found for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "Item not found for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to fetch item by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch item by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, filter))]
    async fn list(&self, filter: &ItemFilter) -> RepositoryResult<Vec<Item>> {
        let items = self.find_all(filter_query(filter)).await?;
        info!("Fetched {} items", items.len());
        Ok(items)
    }

    #[tracing::instrument(skip(self), fields(query = %query))]
    async fn search_title(&self, query: &str) -> RepositoryResult<Vec<Item>> {
        let items = self.find_all(title_search_query(query)).await?;
        info!("Search matched {} items", items.len());
        Ok(items)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn mark_rented(&self, id: ObjectId, from: &str, till: &str) -> RepositoryResult<Item> {
        let filter = doc! { "_id": id };
        let update = doc! { "$set": {
            "available": false,
            "rentedFrom": from,
            "rentedTill": till,
        }};
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Item marked as rented for ID: {}", id);
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No item found to rent for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No item found to rent for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to mark item rented: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to mark item rented: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn mark_returned(&self, id: ObjectId) -> RepositoryResult<Item> {
        let filter = doc! { "_id": id };
        // matched_count, not modified_count: returning an already-available
        // item modifies nothing and must still succeed.
        let update = doc! {
            "$set": { "available": true },
            "$unset": { "rentedFrom": "", "rentedTill": "" },
        };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Item marked as returned for ID: {}", id);
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No item found to return for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No item found to return for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to mark item returned: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to mark item returned: {}",
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_empty() {
        let query = filter_query(&ItemFilter::default());
        assert!(query.is_empty());
    }

    #[test]
    fn test_filter_query_all_fields() {
        let filter = ItemFilter {
            category: Some("tools".to_string()),
            min_price: Some(5.0),
            max_price: Some(20.0),
            available: Some(true),
            owner_email: Some("a@x.com".to_string()),
        };
        let query = filter_query(&filter);
        assert_eq!(query.get_str("category").unwrap(), "tools");
        let price = query.get_document("pricePerDay").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 5.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 20.0);
        assert_eq!(query.get_bool("available").unwrap(), true);
        assert_eq!(query.get_str("ownerEmail").unwrap(), "a@x.com");
    }

    #[test]
    fn test_filter_query_single_bound() {
        let filter = ItemFilter {
            min_price: Some(10.0),
            ..Default::default()
        };
        let query = filter_query(&filter);
        let price = query.get_document("pricePerDay").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 10.0);
        assert!(price.get("$lte").is_none());
    }

    #[test]
    fn test_title_search_query_case_insensitive() {
        let query = title_search_query("drill");
        let title = query.get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), "drill");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }
}
