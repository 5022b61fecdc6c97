mod amazon;

pub use amazon::{extract_record, AmazonScraper};
