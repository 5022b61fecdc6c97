pub mod product;

pub use product::*;

/// Fallback for the availability field when its markup is missing entirely.
pub const NOT_AVAILABLE: &str = "Not Available";
