use anyhow::{Context, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, CONNECTION, REFERER, TE,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::Config;

/// Build the shared client with the static browser header set.
///
/// Accept-Encoding is left to reqwest's content-decoding features so the
/// body arrives decompressed.
pub fn create_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)?,
    );
    headers.insert(REFERER, HeaderValue::from_str(&config.referer)?);
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(TE, HeaderValue::from_static("Trailers"));

    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    Ok(client)
}

/// Fetch a page body, retrying failed attempts with exponential backoff.
pub async fn fetch_html(client: &Client, url: &str, max_retries: u32) -> Result<String> {
    let mut last_error = None;

    for attempt in 1..=max_retries {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response
                        .text()
                        .await
                        .with_context(|| format!("Failed to read response body from {}", url));
                }
                warn!("HTTP error {}: {}", status, url);
                last_error = Some(anyhow::anyhow!("HTTP error: {}", status));
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                last_error = Some(e.into());
            }
        }

        if attempt < max_retries {
            let delay = Duration::from_secs(2u64.pow(attempt));
            warn!(
                "Retrying in {:?}... (attempt {}/{})",
                delay,
                attempt + 1,
                max_retries
            );
            sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
        .context(format!("Failed to fetch {} after {} attempts", url, max_retries))
}
