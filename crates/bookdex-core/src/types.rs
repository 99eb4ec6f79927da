use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BookdexError, Result};

/// One row of a volume search. `id` is the only field the API guarantees;
/// the rest degrade to placeholder text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    pub title: String,
    pub authors: String,
}

impl Volume {
    pub fn from_json(v: &Value) -> Result<Self> {
        let id = v
            .get("id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(BookdexError::MissingField("id"))?
            .to_string();

        let info = v
            .get("volumeInfo")
            .and_then(Value::as_object)
            .ok_or(BookdexError::MissingField("volumeInfo"))?;

        let title = info
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Title not available")
            .to_string();

        let authors = info
            .get("authors")
            .and_then(Value::as_array)
            .map(|arr| join_authors(arr))
            .unwrap_or_else(|| "No author information".to_string());

        Ok(Self { id, title, authors })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDetails {
    pub title: String,
    pub authors: Option<String>,
    pub description: String,
    pub published: Option<NaiveDate>,
    pub isbn_10: Option<String>,
}

impl VolumeDetails {
    /// Normalizes a single-volume payload. Only `volumeInfo` is required;
    /// every other field degrades to a default or `None`.
    pub fn from_json(v: &Value) -> Result<Self> {
        let info = v
            .get("volumeInfo")
            .and_then(Value::as_object)
            .ok_or(BookdexError::MissingField("volumeInfo"))?;

        let title = info
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Title not available")
            .to_string();

        // Unlike search rows, a details record keeps authors absent rather
        // than substituting placeholder text.
        let authors = info
            .get("authors")
            .and_then(Value::as_array)
            .map(|arr| join_authors(arr));

        let description = info
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("Description not available")
            .to_string();

        // Strict yyyy-MM-dd; anything else (e.g. a bare year) is no date.
        let published = info
            .get("publishedDate")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        // First ISBN_10 entry wins; ISBN_13 entries are ignored.
        let isbn_10 = info
            .get("industryIdentifiers")
            .and_then(Value::as_array)
            .and_then(|ids| {
                ids.iter()
                    .find(|entry| entry.get("type").and_then(Value::as_str) == Some("ISBN_10"))
            })
            .map(|entry| {
                entry
                    .get("identifier")
                    .and_then(Value::as_str)
                    .unwrap_or("N/A")
                    .to_string()
            });

        Ok(Self {
            title,
            authors,
            description,
            published,
            isbn_10,
        })
    }
}

fn join_authors(arr: &[Value]) -> String {
    arr.iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_search_item_with_defaults() {
        let item = json!({"id": "abc123", "volumeInfo": {}});

        let vol = Volume::from_json(&item).unwrap();
        assert_eq!(vol.id, "abc123");
        assert_eq!(vol.title, "Title not available");
        assert_eq!(vol.authors, "No author information");
    }

    #[test]
    fn joins_authors_in_order() {
        let item = json!({
            "id": "abc123",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert", "Kevin J. Anderson"]
            }
        });

        let vol = Volume::from_json(&item).unwrap();
        assert_eq!(vol.title, "Dune");
        assert_eq!(vol.authors, "Frank Herbert, Kevin J. Anderson");
    }

    #[test]
    fn missing_id_is_an_error() {
        let item = json!({"volumeInfo": {"title": "Dune"}});
        assert!(matches!(
            Volume::from_json(&item),
            Err(BookdexError::MissingField("id"))
        ));
    }

    #[test]
    fn empty_id_is_an_error() {
        let item = json!({"id": "", "volumeInfo": {"title": "Dune"}});
        assert!(matches!(
            Volume::from_json(&item),
            Err(BookdexError::MissingField("id"))
        ));
    }

    #[test]
    fn missing_volume_info_is_an_error() {
        let item = json!({"id": "abc123"});
        assert!(matches!(
            Volume::from_json(&item),
            Err(BookdexError::MissingField("volumeInfo"))
        ));
    }

    #[test]
    fn details_degrade_to_defaults() {
        let payload = json!({"volumeInfo": {}});

        let details = VolumeDetails::from_json(&payload).unwrap();
        assert_eq!(details.title, "Title not available");
        assert_eq!(details.authors, None);
        assert_eq!(details.description, "Description not available");
        assert_eq!(details.published, None);
        assert_eq!(details.isbn_10, None);
    }

    #[test]
    fn details_require_volume_info() {
        let payload = json!({"id": "abc123"});
        assert!(matches!(
            VolumeDetails::from_json(&payload),
            Err(BookdexError::MissingField("volumeInfo"))
        ));
    }

    #[test]
    fn first_isbn10_wins() {
        let payload = json!({
            "volumeInfo": {
                "industryIdentifiers": [
                    {"type": "ISBN_13", "identifier": "9780131103627"},
                    {"type": "ISBN_10", "identifier": "0131103628"},
                    {"type": "ISBN_10", "identifier": "0000000000"}
                ]
            }
        });

        let details = VolumeDetails::from_json(&payload).unwrap();
        assert_eq!(details.isbn_10.as_deref(), Some("0131103628"));
    }

    #[test]
    fn isbn10_entry_without_identifier_is_na() {
        let payload = json!({
            "volumeInfo": {
                "industryIdentifiers": [{"type": "ISBN_10"}]
            }
        });

        let details = VolumeDetails::from_json(&payload).unwrap();
        assert_eq!(details.isbn_10.as_deref(), Some("N/A"));
    }

    #[test]
    fn only_isbn13_means_no_isbn() {
        let payload = json!({
            "volumeInfo": {
                "industryIdentifiers": [
                    {"type": "ISBN_13", "identifier": "9780131103627"}
                ]
            }
        });

        let details = VolumeDetails::from_json(&payload).unwrap();
        assert_eq!(details.isbn_10, None);
    }

    #[test]
    fn parses_strict_date() {
        let payload = json!({"volumeInfo": {"publishedDate": "1998-10-30"}});

        let details = VolumeDetails::from_json(&payload).unwrap();
        assert_eq!(details.published, NaiveDate::from_ymd_opt(1998, 10, 30));
    }

    #[test]
    fn bare_year_is_no_date() {
        let payload = json!({"volumeInfo": {"publishedDate": "1998"}});

        let details = VolumeDetails::from_json(&payload).unwrap();
        assert_eq!(details.published, None);
    }
}
