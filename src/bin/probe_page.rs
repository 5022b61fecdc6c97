use anyhow::{bail, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::fs;

// Dumps a product page and reports how many elements each extraction
// marker matches. Handy when a layout shift makes a field come back empty.
#[tokio::main]
async fn main() -> Result<()> {
    let url = match std::env::args().nth(1) {
        Some(url) => url,
        None => bail!("Usage: probe_page <product-page-url>"),
    };

    let client = Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3")
        .build()?;

    println!("Fetching {}...", url);
    let response = client.get(&url).send().await?;
    let html = response.text().await?;
    fs::write("product_sample.html", &html)?;
    println!("Saved raw HTML to product_sample.html");

    let document = Html::parse_document(&html);

    let markers = vec![
        "span#productTitle",
        "span#priceblock_ourprice",
        "span#priceblock_dealprice",
        "span.a-price-whole",
        "span.a-icon-alt",
        "span#acrCustomerReviewText",
        "div#availability span",
        "a#bylineInfo",
        "a.a-link-normal.a-color-tertiary",
        "table#productDetails_techSpec_section_1",
        "table#productDetails_detailBullets_sections1",
        "div#feature-bullets span.a-list-item",
    ];

    for marker in markers {
        if let Ok(selector) = Selector::parse(marker) {
            let count = document.select(&selector).count();
            println!("Selector '{}' matched {} elements", marker, count);
        }
    }

    Ok(())
}
