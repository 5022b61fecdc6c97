use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::NOT_AVAILABLE;

/// Everything extracted from a single product page.
///
/// Each field holds the page's text verbatim, or its empty fallback when
/// the markup was absent. Field order matches the CSV/JSON column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub reviews: String,
    pub availability: String,
    pub brand: String,
    pub brand_store_link: String,
    pub category: String,
    pub details: BTreeMap<String, String>,
    pub about_item: String,
    pub link: String,
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            rating: String::new(),
            reviews: String::new(),
            availability: NOT_AVAILABLE.to_string(),
            brand: String::new(),
            brand_store_link: String::new(),
            category: String::new(),
            details: BTreeMap::new(),
            about_item: String::new(),
            link: String::new(),
        }
    }
}

impl ProductRecord {
    pub const CSV_HEADER: [&'static str; 11] = [
        "title",
        "price",
        "rating",
        "reviews",
        "availability",
        "brand",
        "brand_store_link",
        "category",
        "details",
        "about_item",
        "link",
    ];

    /// Project the record into one CSV row. The details map becomes a
    /// compact JSON object inside its cell.
    pub fn csv_row(&self) -> Result<Vec<String>> {
        Ok(vec![
            self.title.clone(),
            self.price.clone(),
            self.rating.clone(),
            self.reviews.clone(),
            self.availability.clone(),
            self.brand.clone(),
            self.brand_store_link.clone(),
            self.category.clone(),
            serde_json::to_string(&self.details)?,
            self.about_item.clone(),
            self.link.clone(),
        ])
    }
}
