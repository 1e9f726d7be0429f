//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use blogforge_core::types::{MediaKind, SearchQuery};

use crate::MetadataError;
use crate::provider::MediaProvider;
use crate::raw::{MovieDetail, RawDetail, SearchPage, SeriesDetail};

const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Sub-resources fetched alongside the detail payload in one round trip.
const APPEND_TO_RESPONSE: &str = "credits,videos,images,external_ids,recommendations,similar";

#[derive(Debug)]
pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Result<Self, MetadataError> {
        if api_key.trim().is_empty() {
            return Err(MetadataError::Configuration(
                "TMDB API key is not set".into(),
            ));
        }
        Ok(Self {
            api_key,
            client: reqwest::Client::new(),
        })
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, MetadataError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(MetadataError::Provider(format!(
                "TMDB returned {status}: {body}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }

    /// Search scoped to the query kind and return the first hit's id.
    ///
    /// First-match-wins: no ranking or disambiguation. Known simplification
    /// carried over from the original pipeline.
    async fn search_first(&self, query: &SearchQuery) -> Result<u64, MetadataError> {
        let page: SearchPage = self
            .get_json(
                &format!("/search/{}", query.kind),
                &[("query", query.text.as_str())],
            )
            .await?;

        page.results
            .first()
            .map(|hit| hit.id)
            .ok_or(MetadataError::NotFound)
    }
}

#[async_trait::async_trait]
impl MediaProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_media(&self, query: &SearchQuery) -> Result<RawDetail, MetadataError> {
        if query.text.trim().is_empty() {
            return Err(MetadataError::InvalidRequest("empty query".into()));
        }

        let id = self.search_first(query).await?;
        let params = [("append_to_response", APPEND_TO_RESPONSE)];

        match query.kind {
            MediaKind::Movie => {
                let detail: MovieDetail = self.get_json(&format!("/movie/{id}"), &params).await?;
                Ok(RawDetail::Movie(detail))
            }
            MediaKind::Series => {
                let detail: SeriesDetail = self.get_json(&format!("/tv/{id}"), &params).await?;
                Ok(RawDetail::Series(detail))
            }
        }
    }
}
