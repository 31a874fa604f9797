//! Ship catalog loading.
//!
//! - Tries each configured source once, in priority order.
//! - The first source that answers with parseable JSON wins.
//! - When every source fails the calculator keeps going with an empty catalog.

use std::{env, fmt, path::PathBuf, time::Duration};

use log::{info, warn};
use reqwest::{header::CACHE_CONTROL, Client};
use url::Url;
use serde_json::Value;
use thiserror::Error;

use crate::domain::ShipCatalog;
use crate::util::persistence::config_dir;

const CATALOG_FILENAME: &str = "ships_v2.json";
const CATALOG_URL_ENV: &str = "HAULING_CATALOG_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("hauling-calculator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no catalog source configured")]
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Remote(Url),
    Local(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Remote(url) => write!(f, "{url}"),
            CatalogSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

impl CatalogSource {
    pub fn remote(raw: &str) -> Result<Self, CatalogError> {
        Ok(CatalogSource::Remote(Url::parse(raw.trim())?))
    }
}

/// Sources in the order they are tried when nothing else is configured.
pub fn default_sources() -> Vec<CatalogSource> {
    let mut sources = Vec::new();

    if let Ok(raw) = env::var(CATALOG_URL_ENV) {
        match CatalogSource::remote(&raw) {
            Ok(source) => sources.push(source),
            Err(err) => warn!("[catalog] Ignoring {CATALOG_URL_ENV}={raw}: {err}"),
        }
    }

    if let Some(dir) = config_dir() {
        sources.push(CatalogSource::Local(dir.join(CATALOG_FILENAME)));
    }
    sources.push(CatalogSource::Local(
        PathBuf::from("assets").join("data").join(CATALOG_FILENAME),
    ));
    sources.push(CatalogSource::Local(
        PathBuf::from("..").join("assets").join("data").join(CATALOG_FILENAME),
    ));

    sources
}

#[derive(Clone)]
pub struct CatalogLoader {
    http: Client,
    sources: Vec<CatalogSource>,
}

impl CatalogLoader {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_sources(default_sources())
    }

    pub fn with_sources(sources: Vec<CatalogSource>) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, sources })
    }

    /// Never fails; an empty catalog means every source was unusable.
    pub async fn load(&self) -> ShipCatalog {
        match self.fetch_first().await {
            Ok((payload, source)) => {
                let catalog = ShipCatalog::from_json(&payload);
                info!("[catalog] Loaded {} ships from {source}", catalog.len());
                catalog
            }
            Err(err) => {
                warn!("[catalog] No ship list available, continuing in custom mode: {err}");
                ShipCatalog::default()
            }
        }
    }

    /// Payload of the first source that answers, with that source.
    pub async fn fetch_first(&self) -> Result<(Value, &CatalogSource), CatalogError> {
        let mut last_error: Option<CatalogError> = None;
        for source in &self.sources {
            match self.fetch_source(source).await {
                Ok(payload) => return Ok((payload, source)),
                Err(error) => {
                    warn!("[catalog] Source {source} failed: {error}; trying next source if available.");
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or(CatalogError::Exhausted))
    }

    async fn fetch_source(&self, source: &CatalogSource) -> Result<Value, CatalogError> {
        let text = match source {
            CatalogSource::Remote(url) => {
                self.http
                    .get(url.clone())
                    .header(CACHE_CONTROL, "no-store")
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
            CatalogSource::Local(path) => tokio::fs::read_to_string(path).await?,
        };

        // Parse the text ourselves: static hosts often send JSON as text/plain.
        Ok(serde_json::from_str(&text)?)
    }
}
