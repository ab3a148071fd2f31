//! Dependency-Track REST API client.

use super::{Instance, Page, PageOptions};
use crate::config::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::error::{ClientErrorKind, CompareError, Result};
use crate::model::{Finding, Project};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Api-Key";
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Connection settings for one instance.
#[derive(Clone)]
pub struct DtrackClientConfig {
    /// Base URL of the instance, e.g. `https://dtrack.example.com`
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries for transport errors and 5xx responses
    pub max_retries: u8,
}

impl DtrackClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for DtrackClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DtrackClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl Default for DtrackClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Blocking HTTP client for one Dependency-Track instance.
///
/// `reqwest::blocking::Client` pools connections internally and is safe to
/// share across comparison workers.
pub struct DtrackClient {
    client: Client,
    base_url: String,
    api_root: Url,
    max_retries: u8,
}

fn network_error(msg: &str, err: &reqwest::Error) -> CompareError {
    CompareError::client(msg, ClientErrorKind::Network(err.to_string()))
}

fn invalid_response(msg: &str, err: &reqwest::Error) -> CompareError {
    CompareError::client(msg, ClientErrorKind::InvalidResponse(err.to_string()))
}

fn api_error(msg: &str, response: Response) -> CompareError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    CompareError::client(msg, ClientErrorKind::Api { status, body })
}

impl DtrackClient {
    /// Create a client. Fails on a malformed URL or an API key that cannot
    /// be sent as a header; no request is made.
    pub fn new(config: DtrackClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let api_root = Url::parse(&format!("{base_url}/api/v1/")).map_err(|e| {
            CompareError::client(
                format!("parsing {:?}", config.base_url),
                ClientErrorKind::InvalidUrl(e.to_string()),
            )
        })?;
        if !matches!(api_root.scheme(), "http" | "https") {
            return Err(CompareError::client(
                format!("parsing {:?}", config.base_url),
                ClientErrorKind::InvalidUrl(format!("unsupported scheme {}", api_root.scheme())),
            ));
        }

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| CompareError::config(format!("invalid API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;

        Ok(Self {
            client,
            base_url,
            api_root,
            max_retries: config.max_retries,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_root.join(path).map_err(|e| {
            CompareError::client(
                format!("building URL for {path}"),
                ClientErrorKind::InvalidUrl(e.to_string()),
            )
        })
    }

    /// GET with retries on transport errors and 5xx responses.
    ///
    /// Any other response, including 4xx, is returned to the caller as-is.
    fn get(&self, url: &Url, query: &[(&str, String)]) -> Result<Response> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(1 << (attempt - 1));
                tracing::debug!("Retry attempt {} for {} after {:?}", attempt, url, delay);
                std::thread::sleep(delay);
            }

            match self.client.get(url.clone()).query(query).send() {
                Ok(response) if response.status().is_server_error() => {
                    last_error = Some(api_error(&format!("GET {url}"), response));
                }
                Ok(response) => return Ok(response),
                Err(e) => last_error = Some(network_error(&format!("GET {url}"), &e)),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            CompareError::client(
                format!("GET {url}"),
                ClientErrorKind::Network("no attempt made".to_string()),
            )
        }))
    }

    fn get_page<T: DeserializeOwned>(
        &self,
        url: &Url,
        mut query: Vec<(&str, String)>,
        page: PageOptions,
    ) -> Result<Page<T>> {
        query.push(("pageNumber", page.page_number.to_string()));
        query.push(("pageSize", page.page_size.to_string()));

        let response = self.get(url, &query)?;
        if !response.status().is_success() {
            return Err(api_error(&format!("GET {url}"), response));
        }

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let items = response
            .json()
            .map_err(|e| invalid_response(&format!("decoding {url}"), &e))?;

        Ok(Page { items, total_count })
    }
}

impl Instance for DtrackClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_projects(&self, page: PageOptions) -> Result<Page<Project>> {
        let url = self.endpoint("project")?;
        self.get_page(&url, Vec::new(), page)
    }

    fn lookup_project(&self, name: &str, version: &str) -> Result<Option<Project>> {
        let url = self.endpoint("project/lookup")?;
        let query = [("name", name.to_string()), ("version", version.to_string())];
        let response = self.get(&url, &query)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(&format!("looking up {name}/{version}"), response));
        }

        let project = response
            .json()
            .map_err(|e| invalid_response(&format!("decoding project {name}/{version}"), &e))?;
        Ok(Some(project))
    }

    fn list_findings(
        &self,
        project_uuid: &str,
        include_suppressed: bool,
        page: PageOptions,
    ) -> Result<Page<Finding>> {
        let url = self.endpoint(&format!("finding/project/{project_uuid}"))?;
        let query = vec![("suppressed", include_suppressed.to_string())];
        self.get_page(&url, query, page)
    }
}
