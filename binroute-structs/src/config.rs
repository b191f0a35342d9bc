use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

serializable_struct_with_getters! {
    ClientConfig {
        api_url: String,
        default_bins: u32,
        default_threshold: f64,
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_bins: 10,
            default_threshold: 0.7,
        }
    }
}

impl ClientConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}
