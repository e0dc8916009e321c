pub mod formatting;
pub mod truncation;
pub mod url;

pub use url::normalize_url;
