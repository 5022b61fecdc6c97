use anyhow::{Context, Result};
use csv::Writer;
use std::fs;
use tracing::info;

use crate::models::ProductRecord;

/// Write the record as a single-row CSV table, header included.
pub fn write_csv(record: &ProductRecord, path: &str) -> Result<()> {
    let mut writer =
        Writer::from_path(path).with_context(|| format!("Failed to create {}", path))?;

    writer.write_record(ProductRecord::CSV_HEADER)?;
    writer.write_record(&record.csv_row()?)?;
    writer.flush()?;

    info!("Wrote CSV output to {}", path);
    Ok(())
}

/// Write the record as one pretty-printed JSON object.
pub fn write_json(record: &ProductRecord, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;

    info!("Wrote JSON output to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample_record() -> ProductRecord {
        let mut details = BTreeMap::new();
        details.insert("Item Weight".to_string(), "250 g".to_string());
        details.insert("Model Name".to_string(), "WH-1000XM5".to_string());

        ProductRecord {
            title: "Sony WH-1000XM5".to_string(),
            price: "₹26,990.00".to_string(),
            rating: "4.5 out of 5 stars".to_string(),
            reviews: "12,387 ratings".to_string(),
            availability: "In stock".to_string(),
            brand: "Visit the Sony Store".to_string(),
            brand_store_link: "https://www.amazon.in/stores/Sony/page/8520".to_string(),
            category: "Electronics".to_string(),
            details,
            about_item: "Industry-leading noise cancellation\nUp to 30-hour battery life"
                .to_string(),
            link: "https://www.amazon.in/dp/B09XS7JWHH".to_string(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("amazon_scraper_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn csv_and_json_hold_the_same_values() {
        let record = sample_record();
        let csv_path = temp_path("product.csv");
        let json_path = temp_path("product.json");

        write_csv(&record, csv_path.to_str().unwrap()).unwrap();
        write_json(&record, json_path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            ProductRecord::CSV_HEADER.to_vec()
        );

        let row = reader.records().next().unwrap().unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();

        for (index, field) in ProductRecord::CSV_HEADER.iter().enumerate() {
            match &json[field] {
                serde_json::Value::String(value) => {
                    assert_eq!(&row[index], value.as_str(), "field {}", field);
                }
                value => {
                    // The details cell carries the map as compact JSON
                    let cell: serde_json::Value = serde_json::from_str(&row[index]).unwrap();
                    assert_eq!(&cell, value, "field {}", field);
                }
            }
        }

        fs::remove_file(csv_path).ok();
        fs::remove_file(json_path).ok();
    }

    #[test]
    fn csv_preserves_multiline_about_item() {
        let record = sample_record();
        let path = temp_path("multiline.csv");

        write_csv(&record, path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[9], record.about_item.as_str());

        fs::remove_file(path).ok();
    }

    #[test]
    fn json_round_trips_through_serde() {
        let record = sample_record();
        let path = temp_path("roundtrip.json");

        write_json(&record, path.to_str().unwrap()).unwrap();

        let loaded: ProductRecord =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.title, record.title);
        assert_eq!(loaded.details, record.details);
        assert_eq!(loaded.link, record.link);

        fs::remove_file(path).ok();
    }
}
