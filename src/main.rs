use anyhow::{bail, Result};
use chrono::Local;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;

mod config;
mod export;
mod models;
mod parsers;
mod scrapers;
mod utils;

use crate::config::Config;
use crate::models::ProductRecord;
use crate::scrapers::AmazonScraper;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("amazon_product_scraper=info".parse()?),
        )
        .init();

    info!(
        "Starting product scrape at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    // Load configuration
    let config = Arc::new(Config::load()?);

    // URL from the first argument, or an interactive prompt
    let url = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => prompt_for_url()?,
    };
    let url = url.trim().to_string();
    if url.is_empty() {
        bail!("No product page URL given");
    }

    // Initialize HTTP client
    let client = utils::http::create_client(&config)?;

    let scraper = AmazonScraper::new(config.clone());
    let record = scraper.scrape(&client, &url).await?;

    print_record(&record);

    export::write_csv(&record, &config.csv_output_path)?;
    export::write_json(&record, &config.json_output_path)?;

    println!(
        "Data has been successfully saved to {} and {}",
        config.csv_output_path, config.json_output_path
    );

    Ok(())
}

fn prompt_for_url() -> Result<String> {
    print!("Enter the Amazon product page URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn print_record(record: &ProductRecord) {
    println!("Title: {}", record.title);
    println!("Price: {}", record.price);
    println!("Rating: {}", record.rating);
    println!("Reviews: {}", record.reviews);
    println!("Availability: {}", record.availability);
    println!("Brand: {}", record.brand);
    println!("Brand Store Link: {}", record.brand_store_link);
    println!("Category: {}", record.category);
    println!("Product Details: {:?}", record.details);
    println!("About This Item: {}", record.about_item);
}
