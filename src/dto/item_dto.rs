use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1))]
    pub title: String,

    pub description: Option<String>,

    #[validate(range(min = 0.0))]
    pub price_per_day: f64,

    #[validate(length(min = 1))]
    pub category: String,

    pub image_url: Option<String>,

    #[validate(length(min = 1))]
    pub owner_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookItemRequest {
    #[validate(length(min = 1))]
    pub start_date: String,

    #[validate(length(min = 1))]
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
