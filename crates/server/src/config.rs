use metadata::{AssemblerConfig, DEFAULT_API_URL};
use std::path::PathBuf;
use std::time::Duration;

/// Default number of recommendations per facet
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

/// Browse grid: two rows of five
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `movies.dat` and `browse.dat`
    pub data_dir: PathBuf,

    /// Directory holding the `similarity_<facet>.bin` files
    pub facet_dir: PathBuf,

    /// Metadata API root
    pub api_url: String,

    /// Metadata API key; without one every lookup serves placeholders
    pub api_key: Option<String>,

    pub image_base_url: String,
    pub placeholder_image_url: String,
    pub placeholder_biography: String,

    /// Per-request timeout of metadata calls
    pub request_timeout: Duration,

    pub recommendation_count: usize,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let assembler = AssemblerConfig::default();
        Self {
            data_dir: PathBuf::from("data"),
            facet_dir: PathBuf::from("data/facets"),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            image_base_url: assembler.image_base_url,
            placeholder_image_url: assembler.placeholder_image_url,
            placeholder_biography: assembler.placeholder_biography,
            request_timeout: Duration::from_secs(10),
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn assembler_config(&self) -> AssemblerConfig {
        AssemblerConfig {
            image_base_url: self.image_base_url.clone(),
            placeholder_image_url: self.placeholder_image_url.clone(),
            placeholder_biography: self.placeholder_biography.clone(),
        }
    }

    /// API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.facet_dir, PathBuf::from("data/facets"));
        assert_eq!(config.api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.recommendation_count, 5);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.assembler_config(), AssemblerConfig::default());
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = AppConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
