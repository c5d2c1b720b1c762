#![allow(dead_code)]

use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Mutex;

use rently_backend::model::item::{Item, ItemFilter};
use rently_backend::model::user::User;
use rently_backend::repository::item_repo::ItemRepository;
use rently_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use rently_backend::repository::user_repo::UserRepository;

/// In-memory stand-in for the Mongo-backed user repository.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        user.created_at = Some("2024-01-01T00:00:00+00:00".to_string());
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory stand-in for the Mongo-backed item repository. Applies the
/// same filter and search semantics the Mongo queries express.
#[derive(Default)]
pub struct MemoryItemRepository {
    items: Mutex<HashMap<ObjectId, Item>>,
}

fn matches_filter(item: &Item, filter: &ItemFilter) -> bool {
    if let Some(ref category) = filter.category {
        if &item.category != category {
            return false;
        }
    }
    if let Some(min) = filter.min_price {
        if item.pricePerDay < min {
            return false;
        }
    }
    if let Some(max) = filter.max_price {
        if item.pricePerDay > max {
            return false;
        }
    }
    if let Some(available) = filter.available {
        if item.available != available {
            return false;
        }
    }
    if let Some(ref owner) = filter.owner_email {
        if &item.ownerEmail != owner {
            return false;
        }
    }
    true
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn create(&self, item: Item) -> RepositoryResult<Item> {
        let mut new_item = item;
        let id = ObjectId::new();
        new_item.id = Some(id);
        new_item.createdAt = Some("2024-01-01T00:00:00+00:00".to_string());
        self.items.lock().unwrap().insert(id, new_item.clone());
        Ok(new_item)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Item> {
        self.items
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Item not found for ID: {}", id)))
    }

    async fn list(&self, filter: &ItemFilter) -> RepositoryResult<Vec<Item>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .values()
            .filter(|i| matches_filter(i, filter))
            .cloned()
            .collect())
    }

    async fn search_title(&self, query: &str) -> RepositoryResult<Vec<Item>> {
        let q = query.to_lowercase();
        let items = self.items.lock().unwrap();
        Ok(items
            .values()
            .filter(|i| i.title.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }

    async fn mark_rented(&self, id: ObjectId, from: &str, till: &str) -> RepositoryResult<Item> {
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found(format!("No item found to rent for ID: {}", id))
        })?;
        item.available = false;
        item.rentedFrom = Some(from.to_string());
        item.rentedTill = Some(till.to_string());
        Ok(item.clone())
    }

    async fn mark_returned(&self, id: ObjectId) -> RepositoryResult<Item> {
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found(format!("No item found to return for ID: {}", id))
        })?;
        item.available = true;
        item.rentedFrom = None;
        item.rentedTill = None;
        Ok(item.clone())
    }
}
