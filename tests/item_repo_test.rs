use rently_backend::config::mongo_conf::MongoConfig;
use rently_backend::model::item::{Item, ItemFilter};
use rently_backend::repository::item_repo::{ItemRepository, MongoItemRepository};
use rently_backend::repository::mongo_store::MongoStore;

async fn setup_item_repository() -> Option<MongoItemRepository> {
    let _ = dotenv::dotenv();
    if std::env::var("MONGO_URI").is_err() {
        eprintln!("Skipping MongoDB integration test: MONGO_URI not set");
        return None;
    }
    let config = MongoConfig::from_env().expect("Failed to load MongoConfig");
    let store = MongoStore::connect(&config)
        .await
        .expect("Failed to connect to MongoDB");
    Some(MongoItemRepository::new(&store, "test_items"))
}

#[tokio::test]
async fn test_item_repository_workflow() {
    let Some(item_repo) = setup_item_repository().await else {
        return;
    };

    let item = Item {
        id: None,
        title: "Ladder".to_string(),
        description: Some("Aluminium, 3m".to_string()),
        pricePerDay: 10.0,
        category: "tools".to_string(),
        imageUrl: None,
        available: true,
        ownerEmail: "a@x.com".to_string(),
        rentedFrom: None,
        rentedTill: None,
        createdAt: None,
    };

    // Insert the item
    let inserted = item_repo.create(item.clone()).await.expect("Failed to insert item");
    assert!(inserted.id.is_some());
    assert!(inserted.createdAt.is_some());
    let item_id = inserted.id.unwrap();

    // Get by id
    let fetched = item_repo.get_by_id(item_id).await.expect("Failed to get item by id");
    assert_eq!(fetched.title, item.title);
    assert!(fetched.available);

    // Mark rented
    let rented = item_repo
        .mark_rented(item_id, "2024-01-01", "2024-01-05")
        .await
        .expect("Failed to mark item rented");
    assert!(!rented.available);
    assert_eq!(rented.rentedFrom.as_deref(), Some("2024-01-01"));
    assert_eq!(rented.rentedTill.as_deref(), Some("2024-01-05"));

    // List with owner filter
    let filter = ItemFilter {
        owner_email: Some("a@x.com".to_string()),
        ..Default::default()
    };
    let listed = item_repo.list(&filter).await.expect("Failed to list items");
    assert!(listed.iter().any(|i| i.id == Some(item_id)));

    // Title search is case-insensitive
    let found = item_repo.search_title("ladder").await.expect("Failed to search items");
    assert!(found.iter().any(|i| i.id == Some(item_id)));

    // Mark returned clears the rental dates
    let returned = item_repo.mark_returned(item_id).await.expect("Failed to mark item returned");
    assert!(returned.available);
    assert!(returned.rentedFrom.is_none());
    assert!(returned.rentedTill.is_none());

    // Returning again is a no-op success
    let returned_again = item_repo.mark_returned(item_id).await.expect("Second return should succeed");
    assert!(returned_again.available);
}
