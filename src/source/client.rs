//! Label Studio REST client.
//!
//! Endpoints used:
//! - `GET /api/projects?page=N&page_size=S` → `{count, next, results}`
//! - `GET /api/tasks?project=ID&page=N&page_size=S&fields=all` → `{total, tasks}`
//!
//! Requests authenticate with `Authorization: Token <key>`. Pages are
//! fetched one after another until the reported total is reached, a page
//! comes back empty, or the server answers 404 past the first page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use super::{AnnotationSource, Project, Result, SourceError};
use crate::annotation::Task;
use crate::config::Config;

/// HTTP client for a Label Studio instance.
pub struct LabelStudioClient {
    client: Client,
    base_url: Url,
    page_size: usize,
}

impl LabelStudioClient {
    /// Create a client for the instance and credentials in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&format!("Token {}", config.api_key))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .use_rustls_tls()
            .gzip(true)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(&config.url)?,
            page_size: config.page_size.max(1),
        })
    }

    /// Base URL every endpoint is resolved against (always ends in `/`).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of one listing page.
    fn page_url(&self, path: &str, page: usize, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs
                .append_pair("page", &page.to_string())
                .append_pair("page_size", &self.page_size.to_string());
        }
        Ok(url)
    }

    /// GET a JSON document. A 404 yields `Ok(None)` when `missing_ok` is set.
    #[instrument(skip(self), fields(url = %url))]
    async fn get_json<T: DeserializeOwned>(&self, url: Url, missing_ok: bool) -> Result<Option<T>> {
        debug!("Requesting page");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND && missing_ok {
            debug!("Page not found, end of listing");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Collect every item of a paginated listing.
    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = self.page_url(path, page, query)?;
            let Some(body) = self.get_json::<Value>(url, page > 1).await? else {
                break;
            };

            match Listing::<T>::from_body(body)? {
                Listing::Plain(all) => {
                    items.extend(all);
                    break;
                }
                Listing::Paged(Page {
                    results,
                    count,
                    next,
                }) => {
                    let fetched = results.len();
                    items.extend(results);

                    let done = match count {
                        Some(total) => items.len() >= total,
                        None => next.is_none(),
                    };
                    if fetched == 0 || done {
                        break;
                    }
                }
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl AnnotationSource for LabelStudioClient {
    fn name(&self) -> &'static str {
        "label-studio"
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Vec<Project> = self.list_all("api/projects", &[]).await?;
        info!(count = projects.len(), "Listed projects");
        Ok(projects)
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>> {
        let query = [
            ("project", project_id.to_string()),
            ("fields", "all".to_string()),
        ];
        let tasks: Vec<Task> = self.list_all("api/tasks", &query).await?;
        info!(project_id, count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }
}

/// One page of a paged listing. Items are named `results` (projects) or
/// `tasks`, the total `count` or `total`.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(alias = "tasks")]
    results: Vec<T>,
    #[serde(default, alias = "total")]
    count: Option<usize>,
    #[serde(default)]
    next: Option<String>,
}

/// A listing response: a paged envelope or a bare array.
#[derive(Debug)]
enum Listing<T> {
    Paged(Page<T>),
    Plain(Vec<T>),
}

impl<T: DeserializeOwned> Listing<T> {
    /// Decode a response body, keeping serde's error for the shape it has.
    fn from_body(body: Value) -> Result<Self> {
        Ok(match body {
            Value::Array(_) => Listing::Plain(serde_json::from_value(body)?),
            other => Listing::Paged(serde_json::from_value(other)?),
        })
    }
}

/// Parse the instance URL, making sure its path ends in `/` so endpoint
/// paths resolve below it.
fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
