use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub referer: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub csv_output_path: String,
    pub json_output_path: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // For now, hardcode the configuration matching the original header set
        Ok(Config {
            base_url: "https://www.amazon.in".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            referer: "https://www.amazon.in/".to_string(),
            request_timeout_secs: 25,
            max_retries: 3,
            csv_output_path: "amazon_product_data.csv".to_string(),
            json_output_path: "amazon_product_data.json".to_string(),
        })
    }
}
