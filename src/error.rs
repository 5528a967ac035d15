use std::num::ParseFloatError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("build http client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url}: server answered {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Client { .. } => None,
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => Some(url.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("product #{index}: required {field} not found using '{selector}'")]
    MissingElement {
        index: usize,
        field: &'static str,
        selector: &'static str,
    },

    #[error("product #{index}: {field} is empty")]
    EmptyField { index: usize, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("price {raw:?} does not reduce to a number")]
pub struct NormalizationError {
    pub raw: String,
    #[source]
    pub source: ParseFloatError,
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("compile product selectors")]
    Selectors(#[source] ParseError),

    #[error("parse page {page} ({url})")]
    Parse {
        page: u32,
        url: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
