//! Link entity representing a shortened URL mapping.

use serde::Deserialize;
use validator::Validate;

/// A shortened URL owned by a user.
///
/// Maps an 8-character `short_id` to the original URL. Ownership is recorded by
/// username value; the storage layer declares no foreign key for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub original_url: String,
    pub username: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, short_id: String, original_url: String, username: String) -> Self {
        Self {
            id,
            short_id,
            original_url,
            username,
        }
    }
}

/// Input data for inserting a new link row.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_id: String,
    pub original_url: String,
    pub username: String,
}

/// A request to shorten a URL, as submitted by the home page form.
///
/// The URL is stored verbatim; only emptiness is rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL is required"))]
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new(
            1,
            "abcd1234".to_string(),
            "https://example.com".to_string(),
            "alice".to_string(),
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.short_id, "abcd1234");
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.username, "alice");
    }

    #[test]
    fn test_shorten_request_rejects_empty_url() {
        let request = ShortenRequest { url: String::new() };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_shorten_request_accepts_any_non_empty_url() {
        let request = ShortenRequest {
            url: "not even a url".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
