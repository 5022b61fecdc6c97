use anyhow::Result;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::models::{ProductRecord, NOT_AVAILABLE};
use crate::parsers::{clean_text, normalize_detail_text};
use crate::utils::http::fetch_html;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span#productTitle").expect("invalid title selector"));

static OUR_PRICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span#priceblock_ourprice").expect("invalid price selector"));

static DEAL_PRICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span#priceblock_dealprice").expect("invalid price selector"));

static WHOLE_PRICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.a-price-whole").expect("invalid price selector"));

static RATING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.a-icon-alt").expect("invalid rating selector"));

static REVIEW_COUNT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span#acrCustomerReviewText").expect("invalid review count selector")
});

static AVAILABILITY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#availability span").expect("invalid availability selector"));

static BYLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a#bylineInfo").expect("invalid byline selector"));

static CATEGORY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a.a-link-normal.a-color-tertiary").expect("invalid category selector")
});

static TECH_SPEC_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table#productDetails_techSpec_section_1").expect("invalid table selector")
});

static DETAIL_BULLETS_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table#productDetails_detailBullets_sections1").expect("invalid table selector")
});

static TABLE_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("invalid row selector"));

static TABLE_HEADER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("invalid header selector"));

static TABLE_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("invalid cell selector"));

static FEATURE_BULLETS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#feature-bullets").expect("invalid feature bullets selector"));

static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.a-list-item").expect("invalid list item selector"));

pub struct AmazonScraper {
    config: Arc<Config>,
}

impl AmazonScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Fetch one product page and extract every field from it.
    pub async fn scrape(&self, client: &Client, url: &str) -> Result<ProductRecord> {
        info!("Fetching product page: {}", url);

        let html = fetch_html(client, url, self.config.max_retries).await?;
        let record = extract_record(&html, url, &self.config.base_url);

        if record.title.is_empty() {
            info!("Page fetched but no product title found");
        } else {
            info!("Extracted product: {}", record.title);
        }

        Ok(record)
    }
}

/// Extract all fields from a fetched page. Missing markup never fails a
/// field; each one falls back to its empty default.
pub fn extract_record(html: &str, url: &str, base_url: &str) -> ProductRecord {
    let document = Html::parse_document(html);

    ProductRecord {
        title: extract_title(&document),
        price: extract_price(&document),
        rating: extract_rating(&document),
        reviews: extract_review_count(&document),
        availability: extract_availability(&document),
        brand: extract_brand(&document),
        brand_store_link: resolve_link(&extract_brand_store_link(&document), base_url),
        category: extract_category(&document),
        details: extract_product_details(&document),
        about_item: extract_about_item(&document),
        link: url.to_string(),
    }
}

fn element_text(element: ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn extract_title(document: &Html) -> String {
    first_text(document, &TITLE_SELECTOR).unwrap_or_default()
}

/// Regular, deal and fragmented price markers, tried in order. The first
/// one present in the document wins.
fn extract_price(document: &Html) -> String {
    first_text(document, &OUR_PRICE_SELECTOR)
        .or_else(|| first_text(document, &DEAL_PRICE_SELECTOR))
        .or_else(|| first_text(document, &WHOLE_PRICE_SELECTOR))
        .unwrap_or_default()
}

fn extract_rating(document: &Html) -> String {
    first_text(document, &RATING_SELECTOR).unwrap_or_default()
}

fn extract_review_count(document: &Html) -> String {
    first_text(document, &REVIEW_COUNT_SELECTOR).unwrap_or_default()
}

fn extract_availability(document: &Html) -> String {
    first_text(document, &AVAILABILITY_SELECTOR).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn extract_brand(document: &Html) -> String {
    first_text(document, &BYLINE_SELECTOR).unwrap_or_default()
}

fn extract_brand_store_link(document: &Html) -> String {
    document
        .select(&BYLINE_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .unwrap_or_default()
}

fn extract_category(document: &Html) -> String {
    first_text(document, &CATEGORY_SELECTOR).unwrap_or_default()
}

/// Walk the spec table row by row. Rows missing a header or value cell
/// are skipped; the rest still contribute.
fn extract_product_details(document: &Html) -> BTreeMap<String, String> {
    let mut details = BTreeMap::new();

    let table = document
        .select(&TECH_SPEC_TABLE_SELECTOR)
        .next()
        .or_else(|| document.select(&DETAIL_BULLETS_TABLE_SELECTOR).next());

    if let Some(table) = table {
        for row in table.select(&TABLE_ROW_SELECTOR) {
            let header = row.select(&TABLE_HEADER_SELECTOR).next();
            let cell = row.select(&TABLE_CELL_SELECTOR).next();

            if let (Some(header), Some(cell)) = (header, cell) {
                let key = normalize_detail_text(&header.text().collect::<String>());
                let value = normalize_detail_text(&cell.text().collect::<String>());
                if !key.is_empty() {
                    details.insert(key, value);
                }
            }
        }
    }

    details
}

fn extract_about_item(document: &Html) -> String {
    match document.select(&FEATURE_BULLETS_SELECTOR).next() {
        Some(section) => section
            .select(&LIST_ITEM_SELECTOR)
            .map(element_text)
            .collect::<Vec<_>>()
            .join("\n"),
        None => String::new(),
    }
}

/// Resolve a relative brand store link against the shop's base URL. An
/// already absolute link passes through untouched.
fn resolve_link(href: &str, base_url: &str) -> String {
    if href.is_empty() || href.starts_with("https://") {
        return href.to_string();
    }

    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => href.to_string(),
    }
}
