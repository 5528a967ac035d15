use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com/";
pub const DEFAULT_PAGE_PATH: &str = "catalogue/page-{page}.html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const PAGE_PLACEHOLDER: &str = "{page}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("parse base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("base url must be http/https: {0}")]
    UnsupportedScheme(String),

    #[error("page path template must contain {{page}}: {0:?}")]
    MissingPagePlaceholder(String),

    #[error("page {page} resolves to an invalid url: {message}")]
    InvalidPageUrl { page: u32, message: String },
}

/// Where and how listing pages are requested.
///
/// Page 1 is the base URL itself; page `k >= 2` is the base URL joined with
/// `page_path` after substituting `{page}`.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub page_path: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ScrapeConfig {
    pub fn new(
        base_url: &str,
        page_path: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: base_url.to_owned(),
            message: err.to_string(),
        })?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(base_url.to_string()));
        }
        // Relative joins replace the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        if !page_path.contains(PAGE_PLACEHOLDER) {
            return Err(ConfigError::MissingPagePlaceholder(page_path.to_owned()));
        }

        Ok(Self {
            base_url,
            page_path: page_path.to_owned(),
            user_agent: user_agent.to_owned(),
            timeout,
        })
    }

    pub fn books_toscrape() -> Result<Self, ConfigError> {
        Self::new(
            DEFAULT_BASE_URL,
            DEFAULT_PAGE_PATH,
            DEFAULT_USER_AGENT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn page_url(&self, page: u32) -> Result<Url, ConfigError> {
        if page <= 1 {
            return Ok(self.base_url.clone());
        }
        let path = self.page_path.replace(PAGE_PLACEHOLDER, &page.to_string());
        self.base_url
            .join(&path)
            .map_err(|err| ConfigError::InvalidPageUrl {
                page,
                message: err.to_string(),
            })
    }
}
