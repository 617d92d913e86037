//! A typed client for Stud.IP's JSON:API.
//!
//! Resources are decoded into read-only entities and creation requests are encoded back into
//! JSON:API resource objects. The HTTP session is supplied by the caller through [`Transport`]
//! and must already be authenticated.
pub mod config;
pub mod course;
pub mod files;
pub mod membership;
pub mod messages;
pub mod news;
mod query;
pub mod resource;
pub mod semesters;
pub mod status_groups;
pub mod transport;
pub mod users;

pub use config::Config;
pub use query::Query;
pub use resource::{Decode, Encode, SchemaViolation};
pub use transport::Transport;

use log::debug;
use serde_json::{json, Value};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Number of items requested per collection fetch, unless configured otherwise.
pub const DEFAULT_PAGE_LIMIT: usize = 10000;

/// Content type for JSON:API request bodies
pub const JSONAPI_CONTENT_TYPE: &str = "application/vnd.api+json";

/// A client for a Stud.IP JSON:API endpoint
pub struct Client<T = reqwest::blocking::Client> {
    base: String,
    http: T,
    page_limit: usize,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("http error: {}", .0)]
    HTTPError(#[from] reqwest::Error),

    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("response from {url} did not match the expected schema{}: {source}", item_suffix(.index))]
    Schema {
        url: String,
        index: Option<usize>,
        source: SchemaViolation,
    },

    #[error("io error: {}", .0)]
    IOError(#[from] std::io::Error),

    #[error("serde error: {}", .0)]
    SerdeError(#[from] serde_json::Error),

    #[error("couldn't find config directories: {}", .0)]
    XdgError(#[from] xdg::BaseDirectoriesError),

    #[error("config does not exist")]
    NoConfig,
}

impl<T: Transport> Client<T> {
    /// Create a client for the API rooted at `base`, e.g. `https://studip.example.com/jsonapi.php/v1`.
    pub fn new(http: T, base: &str) -> Self {
        Client {
            base: base.trim_end_matches('/').to_string(),
            http,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn from_config(http: T, config: &Config) -> Self {
        Self::new(http, &config.base_url).with_page_limit(config.page_limit)
    }

    /// Set the `page[limit]` sent with every collection fetch
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn page_limit(&self) -> usize {
        self.page_limit
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Fetch a single resource and decode it.
    pub fn get_single<D: Decode>(&self, path: &str) -> Result<D> {
        let url = self.url(path);
        let body = self.http.get_json(&url)?;
        let data = envelope(&url, &body)?;

        D::decode(data).map_err(|source| Error::Schema {
            url,
            index: None,
            source,
        })
    }

    /// Fetch a collection, decoding every item. A single malformed item fails the whole call.
    pub fn get_collection<D: Decode>(&self, path: &str, query: Query) -> Result<Vec<D>> {
        let url = format!("{}?{}", self.url(path), query.to_query_string());
        let body = self.http.get_json(&url)?;
        let Value::Array(items) = envelope(&url, &body)? else {
            return Err(Error::Schema {
                url,
                index: None,
                source: SchemaViolation::NotACollection,
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                D::decode(item).map_err(|source| Error::Schema {
                    url: url.clone(),
                    index: Some(i),
                    source,
                })
            })
            .collect()
    }

    /// Start a collection query using the configured page limit
    pub(crate) fn query(&self) -> Query {
        Query::new(self.page_limit)
    }

    /// POST a creation request, discarding the response body.
    pub fn create<E: Encode>(&self, path: &str, request: &E) -> Result<()> {
        self.post(path, request)?;
        Ok(())
    }

    /// POST a creation request and decode the created resource from the response.
    pub fn create_returning<E: Encode, D: Decode>(&self, path: &str, request: &E) -> Result<D> {
        let (url, body) = self.post(path, request)?;
        let data = envelope(&url, &body)?;

        D::decode(data).map_err(|source| Error::Schema {
            url,
            index: None,
            source,
        })
    }

    fn post<E: Encode>(&self, path: &str, request: &E) -> Result<(String, Value)> {
        let url = self.url(path);
        let payload = json!({ "data": request.encode() });
        let body = self.http.post_json(
            &url,
            &[("Content-Type", JSONAPI_CONTENT_TYPE)],
            &payload,
        )?;

        Ok((url, body))
    }

    pub(crate) fn post_file(&self, path: &str, filename: &str, content: Vec<u8>) -> Result<()> {
        let url = self.url(path);
        debug!("uploading {} bytes as {:?} to {}", content.len(), filename, url);
        self.http.post_file(&url, filename, content)
    }
}

fn item_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" (item {})", i)).unwrap_or_default()
}

/// Pull the `data` member out of a response document
fn envelope<'a>(url: &str, body: &'a Value) -> Result<&'a Value> {
    body.get("data").ok_or_else(|| Error::Schema {
        url: url.to_string(),
        index: None,
        source: SchemaViolation::MissingKey("data".to_string()),
    })
}
