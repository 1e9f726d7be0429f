//! Typed TMDB payload models.
//!
//! The movie and series detail shapes share most fields but disagree on the
//! important ones (`title` vs `name`, `release_date` vs `first_air_date`,
//! `runtime` vs `episode_run_time`). They are kept as two separate structs
//! behind the [`RawDetail`] tagged union so the normalizer can match
//! exhaustively instead of probing whichever field happens to exist.
//!
//! Every field is defaulted: deserialization succeeds on any well-formed
//! payload and missing fields surface as `None`/empty downstream.

use serde::Deserialize;

use blogforge_core::types::MediaKind;

/// One page of search results. Only the ids matter; the first hit wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchPage {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub id: u64,
}

/// Detail payload for exactly one search hit, as returned by the provider.
#[derive(Debug, Clone)]
pub enum RawDetail {
    Movie(MovieDetail),
    Series(SeriesDetail),
}

impl RawDetail {
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Series(_) => MediaKind::Series,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieDetail {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub original_language: Option<String>,
    pub production_companies: Vec<Company>,
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub homepage: Option<String>,
    pub external_ids: Option<serde_json::Value>,
    pub credits: Credits,
    pub videos: VideoList,
    pub images: ImageList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeriesDetail {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub episode_run_time: Vec<i32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub original_language: Option<String>,
    pub production_companies: Vec<Company>,
    pub networks: Vec<Company>,
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub homepage: Option<String>,
    pub external_ids: Option<serde_json::Value>,
    pub credits: Credits,
    pub videos: VideoList,
    pub images: ImageList,
    pub seasons: Vec<Season>,
    pub created_by: Vec<Creator>,
    pub last_episode_to_air: Option<Episode>,
    pub next_episode_to_air: Option<Episode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credits {
    pub cast: Vec<CastCredit>,
    pub crew: Vec<CrewCredit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CastCredit {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrewCredit {
    pub name: String,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoList {
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageList {
    pub backdrops: Vec<Artwork>,
    pub posters: Vec<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Artwork {
    pub file_path: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Season {
    pub season_number: i64,
    pub name: String,
    pub episode_count: i64,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Creator {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub season_number: i64,
    pub episode_number: i64,
    pub name: String,
    pub air_date: Option<String>,
}
