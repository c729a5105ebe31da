///! URL slug codec for category names

use serde::{Deserialize, Serialize};

/// URL-safe encoded form of a category display name.
///
/// Encoding replaces every space with an underscore and performs no other
/// normalization (case, punctuation and Unicode pass through untouched).
/// Decoding replaces every underscore with a space, which makes the codec
/// invertible only for names that contain no literal underscore: the name
/// `"foo_bar"` encodes to `"foo_bar"` but decodes back to `"foo bar"`.
/// Published links depend on the raw mapping, so the collision is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Encode a display name into its slug.
    pub fn from_name(name: &str) -> Self {
        Slug(name.replace(' ', "_"))
    }

    /// Wrap a slug string taken verbatim from a request path.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Slug(raw.into())
    }

    /// Decode the slug back into a display name.
    pub fn to_name(&self) -> String {
        self.0.replace('_', " ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
