use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::FetchError;

/// Anything that can hand back the markup of a listing page.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|source| FetchError::Client { source })?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::info!(%url, "fetching");

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().map_err(transport)?;
        tracing::debug!(%url, bytes = html.len(), "fetched");
        Ok(html)
    }
}
