//! Short identifier generation.
//!
//! A short id is the first [`SHORT_ID_LEN`] characters of a freshly generated
//! version-4 UUID in its hyphenated lowercase form. The first hyphen of that form
//! sits at index 8, so the id is always eight lowercase hex digits.

use uuid::Uuid;

/// Number of characters kept from the UUID string.
pub const SHORT_ID_LEN: usize = 8;

/// Top-level paths served by the application itself.
///
/// Generated ids are hex-only and therefore never shadow these routes.
pub const RESERVED_PATHS: &[&str] = &["register", "login", "logout", "shorten", "health", "static"];

/// Generates a random 8-character short id.
///
/// # Examples
///
/// ```ignore
/// let id = generate_short_id();
/// assert_eq!(id.len(), 8);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_short_id() -> String {
    let mut id = Uuid::new_v4().hyphenated().to_string();
    id.truncate(SHORT_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_short_id_has_correct_length() {
        assert_eq!(generate_short_id().len(), SHORT_ID_LEN);
    }

    #[test]
    fn test_generate_short_id_is_lowercase_hex() {
        for _ in 0..100 {
            let id = generate_short_id();
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
                "unexpected character in {id}"
            );
        }
    }

    #[test]
    fn test_generate_short_id_mostly_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_short_id()).collect();

        // 32 bits of randomness; a handful of collisions in 1000 draws would
        // point to a broken generator, not bad luck.
        assert!(ids.len() >= 998);
    }

    #[test]
    fn test_reserved_paths_are_not_hex() {
        for &path in RESERVED_PATHS {
            assert!(
                !path.chars().all(|c| c.is_ascii_hexdigit()),
                "reserved path '{path}' could be generated as a short id"
            );
        }
    }
}
