use std::fmt;

use serde::Serialize;

/// Longest slug accepted, in bytes.
pub const MAX_SLUG_LEN: usize = 128;

/// A page identifier that is safe to use as a file stem and a URL segment.
///
/// Only ASCII letters, digits, `-` and `_` are allowed, so a slug can never
/// name a path outside the pages directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slug(String);

impl Slug {
    /// Returns `None` when `input` is empty, too long or contains any other character.
    pub fn parse(input: &str) -> Option<Slug> {
        if input.is_empty() || input.len() > MAX_SLUG_LEN {
            return None;
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(Slug(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL under which the page is rendered.
    pub fn url(&self) -> String {
        format!("/page/{}", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the page index, as shown on `/` and `/admin`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub name: String,
    pub url: String,
}

impl From<&Slug> for PageSummary {
    fn from(slug: &Slug) -> Self {
        PageSummary {
            name: slug.to_string(),
            url: slug.url(),
        }
    }
}
