//! Bookdex Core — Google Books volume search, details and covers.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::GoogleBooksClient;
pub use config::BookdexConfig;
pub use error::{BookdexError, Result};
pub use types::{Volume, VolumeDetails};
