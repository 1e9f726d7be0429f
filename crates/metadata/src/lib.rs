pub mod normalize;
pub mod provider;
pub mod raw;
pub mod tmdb;

use thiserror::Error;

pub use blogforge_core::types::{MediaKind, SearchQuery};

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("missing configuration: {0}")]
    Configuration(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("not found")]
    NotFound,
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
}

/// Normalized, provider-independent record for one movie or series.
///
/// Produced by [`normalize::normalize`] and never mutated afterwards. Text
/// fields degrade to the empty string when the provider omits them; numeric
/// optionals stay absent. Consumers treat the empty string as "unknown".
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanonicalMedia {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub original_title: String,
    pub tagline: String,
    pub overview: String,
    /// ISO date string, or empty when the provider has none.
    pub release_date: String,
    pub runtime_minutes: Option<i32>,
    pub rating_average: Option<f64>,
    #[serde(default)]
    pub vote_count: i64,
    pub original_language: String,
    pub production_companies: Vec<String>,
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub homepage: String,
    /// Opaque provider mapping (imdb_id etc.); passed through untouched.
    pub external_ids: serde_json::Value,
    pub cast: Vec<CastMember>,
    pub crew_summary: CrewSummary,
    /// Absolute watch URL, or empty when no usable trailer exists.
    pub trailer_url: String,
    pub images: Vec<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesDetails>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub profile_url: Option<String>,
}

/// Crew names partitioned by role. A person may appear in several buckets;
/// source order is preserved and duplicates are not removed.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrewSummary {
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub producers: Vec<String>,
    pub composers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub language_code: Option<String>,
}

/// Series-only fields carried alongside the shared canonical record.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesDetails {
    pub seasons: Vec<SeasonSummary>,
    /// Broadcast networks. Kept distinct from `production_companies`; the UI
    /// may display either, the record keeps both.
    pub networks: Vec<String>,
    pub created_by: Vec<String>,
    pub episode_run_times: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_episode_to_air: Option<EpisodeStub>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode_to_air: Option<EpisodeStub>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeasonSummary {
    pub season_number: i64,
    pub name: String,
    pub episode_count: i64,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EpisodeStub {
    pub season_number: i64,
    pub episode_number: i64,
    pub name: String,
    pub air_date: Option<String>,
}
