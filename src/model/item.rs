use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A rentable listing. Rental dates are stored exactly as supplied by the
/// caller; the booking contract does not require them to parse as dates.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    pub pricePerDay: f64,
    pub category: String,
    pub imageUrl: Option<String>,
    pub available: bool,
    pub ownerEmail: String,
    pub rentedFrom: Option<String>,
    pub rentedTill: Option<String>,
    pub createdAt: Option<String>,
}

/// Conjunctive listing filter: every supplied field must match, absent
/// fields impose no constraint. Price bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub available: Option<bool>,
    pub owner_email: Option<String>,
}
