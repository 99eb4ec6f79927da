use serde::{Deserialize, Serialize};

const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const COVERS_URL: &str = "https://books.google.com/books/content";

/// Endpoints and identity for a [`GoogleBooksClient`](crate::GoogleBooksClient).
/// The URLs are injectable so tests can point the client at a mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookdexConfig {
    pub volumes_url: String,
    pub covers_url: String,
    pub user_agent: String,
}

impl Default for BookdexConfig {
    fn default() -> Self {
        Self {
            volumes_url: VOLUMES_URL.to_string(),
            covers_url: COVERS_URL.to_string(),
            user_agent: "bookdex/0.1".to_string(),
        }
    }
}
