use reqwest::Url;
use serde_json::Value;

use crate::config::BookdexConfig;
use crate::error::{BookdexError, Result};
use crate::http::HttpClient;
use crate::types::{Volume, VolumeDetails};

const MAX_RESULTS: &str = "40";
const FIELDS_PROJECTION: &str = "items(id,volumeInfo(title,authors,publishedDate))";

/// Client for the Google Books volumes API: text search, per-volume details
/// and front-cover bytes. Owns the most recent search's result set, which is
/// replaced wholesale on every successful search and left untouched on a
/// failed one.
///
/// `search` takes `&mut self`, so a search can never race an index read on
/// the same instance; sharing across tasks is the caller's lock to take.
pub struct GoogleBooksClient {
    http: HttpClient,
    config: BookdexConfig,
    results: Vec<Volume>,
}

impl GoogleBooksClient {
    pub fn new() -> Self {
        Self::with_config(BookdexConfig::default())
    }

    pub fn with_config(config: BookdexConfig) -> Self {
        Self {
            http: HttpClient::new(&config.user_agent),
            config,
            results: Vec::new(),
        }
    }

    // ─── Query building ──────────────────────────────────────────────────────

    pub fn search_url(&self, text: &str) -> Result<Url> {
        let mut url = parse_endpoint(&self.config.volumes_url)?;
        url.query_pairs_mut()
            .append_pair("maxResults", MAX_RESULTS)
            .append_pair("fields", FIELDS_PROJECTION)
            .append_pair("q", text);
        Ok(url)
    }

    pub fn details_url(&self, id: &str) -> Result<Url> {
        let mut url = parse_endpoint(&self.config.volumes_url)?;
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|_| BookdexError::InvalidEndpoint(self.config.volumes_url.clone()))?;
            segs.pop_if_empty().push(id);
        }
        Ok(url)
    }

    pub fn cover_url(&self, id: &str) -> Result<Url> {
        let mut url = parse_endpoint(&self.config.covers_url)?;
        url.query_pairs_mut()
            .append_pair("printsec", "frontcover")
            .append_pair("img", "1")
            .append_pair("source", "gbs_api")
            .append_pair("id", id);
        Ok(url)
    }

    // ─── Operations ──────────────────────────────────────────────────────────

    /// Searches volumes by text and replaces the stored result set.
    ///
    /// An absent `items` key is `MissingField("items")` — the API omits the
    /// key entirely for zero hits — while a present, empty array is a valid
    /// empty set. One item without an `id` aborts the whole batch. A failed
    /// search leaves the stored result set untouched and returns the error,
    /// never swallows it.
    pub async fn search(&mut self, text: &str) -> Result<&[Volume]> {
        let url = self.search_url(text)?;
        tracing::debug!(%url, "volume search");
        let json: Value = self.http.get_json(url.as_str()).await?;

        let items = json
            .get("items")
            .and_then(Value::as_array)
            .ok_or(BookdexError::MissingField("items"))?;

        let volumes = items
            .iter()
            .map(Volume::from_json)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = volumes.len(), "search complete");
        self.results = volumes;
        Ok(&self.results)
    }

    /// Positional access into the current result set.
    pub fn volume(&self, index: usize) -> Result<&Volume> {
        self.results.get(index).ok_or(BookdexError::IndexOutOfRange {
            index,
            len: self.results.len(),
        })
    }

    pub fn results(&self) -> &[Volume] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub async fn details(&self, id: &str) -> Result<VolumeDetails> {
        let url = self.details_url(id)?;
        tracing::debug!(%url, "volume details");
        let json: Value = self.http.get_json(url.as_str()).await?;
        VolumeDetails::from_json(&json)
    }

    /// Fetches the raw front-cover bytes for a volume. No decoding or
    /// caching; a failed fetch is returned as an error rather than left
    /// hanging.
    pub async fn cover_image(&self, id: &str) -> Result<Vec<u8>> {
        let url = self.cover_url(id)?;
        tracing::debug!(%url, "cover image");
        self.http.get_bytes(url.as_str()).await
    }
}

impl Default for GoogleBooksClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|_| BookdexError::InvalidEndpoint(endpoint.to_string()))
}
