use serde::{Deserialize, Serialize};

/// Kind of media being looked up. Serialized as TMDB path segments
/// (`movie` / `tv`), which is also the wire form accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated lookup request: non-empty trimmed text plus media kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub kind: MediaKind,
}

impl SearchQuery {
    /// Trim the query text and reject empty queries.
    ///
    /// Returns `None` when the trimmed text is empty; the caller maps this
    /// to its own invalid-request error.
    pub fn new(text: &str, kind: MediaKind) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_to_tmdb_path_segment() {
        assert_eq!(MediaKind::Movie.as_str(), "movie");
        assert_eq!(MediaKind::Series.as_str(), "tv");
    }

    #[test]
    fn query_is_trimmed_and_rejects_empty() {
        let q = SearchQuery::new("  Inception ", MediaKind::Movie).unwrap();
        assert_eq!(q.text, "Inception");
        assert!(SearchQuery::new("   ", MediaKind::Series).is_none());
    }

    #[test]
    fn kind_deserializes_from_wire_form() {
        let k: MediaKind = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(k, MediaKind::Series);
        let k: MediaKind = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(k, MediaKind::Movie);
    }
}
