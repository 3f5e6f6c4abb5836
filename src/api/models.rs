use url::Url;

pub const DEFAULT_FIELD_VALUE: &str = "testdata";
pub const DOWNLOAD_PATH: &str = "download";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Fully resolved download endpoint, prefix included.
    pub endpoint: Url,
    /// Value posted in the `name` form field.
    pub field_value: String,
}

impl ApiConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            field_value: DEFAULT_FIELD_VALUE.to_string(),
        }
    }
}
