use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::item_repo::MongoItemRepository;
use crate::repository::mongo_store::MongoStore;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::item_router::item_router;
use crate::router::user_router::user_router;
use crate::service::catalog_service::CatalogServiceImpl;
use crate::service::user_service::UserServiceImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
    pub catalog_service: Arc<CatalogServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        // Single storage handle, shared by both stores.
        let store = MongoStore::connect(&mongo_config)
            .await
            .expect("MongoDB connection error");
        let user_repo = Arc::new(MongoUserRepository::new(
            &store,
            mongo_config.user_collection_name(),
        ));
        let item_repo = Arc::new(MongoItemRepository::new(
            &store,
            mongo_config.item_collection_name(),
        ));

        let user_service = Arc::new(UserServiceImpl::new(user_repo));
        let catalog_service = Arc::new(CatalogServiceImpl::new(item_repo));

        let router = Router::new()
            .merge(user_router(user_service.clone()))
            .merge(item_router(catalog_service.clone()))
            .route("/health", get(|| async { "OK" }));

        App {
            config,
            router,
            user_service,
            catalog_service,
        }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}
