//! Schema reconciliation: raw provider payloads into [`CanonicalMedia`].
//!
//! Pure and total over well-formed payloads: missing optional fields degrade
//! to empty strings / absent options, never to an error.

use crate::raw::{Artwork, CastCredit, Company, CrewCredit, Genre, ImageList, RawDetail, Video};
use crate::tmdb::IMAGE_BASE;
use crate::{
    CanonicalMedia, CastMember, CrewSummary, EpisodeStub, ImageRef, MediaKind, SeasonSummary,
    SeriesDetails,
};

/// Truncation knobs. Deployments differ only in these constants, so they are
/// configuration rather than forked logic.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Cast entries kept, in provider relevance order.
    pub cast_limit: usize,
    /// Total gallery images kept after concatenating backdrops and posters.
    pub image_cap: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            cast_limit: 12,
            image_cap: 30,
        }
    }
}

pub fn normalize(raw: &RawDetail) -> CanonicalMedia {
    normalize_with(raw, &NormalizeOptions::default())
}

pub fn normalize_with(raw: &RawDetail, opts: &NormalizeOptions) -> CanonicalMedia {
    match raw {
        RawDetail::Movie(d) => CanonicalMedia {
            id: d.id,
            kind: MediaKind::Movie,
            title: d.title.clone().unwrap_or_default(),
            original_title: d.original_title.clone().unwrap_or_default(),
            tagline: d.tagline.clone().unwrap_or_default(),
            overview: d.overview.clone().unwrap_or_default(),
            release_date: d.release_date.clone().unwrap_or_default(),
            runtime_minutes: d.runtime.filter(|r| *r > 0),
            rating_average: d.vote_average,
            vote_count: d.vote_count.unwrap_or(0),
            original_language: d.original_language.clone().unwrap_or_default(),
            production_companies: company_names(&d.production_companies),
            genres: genre_names(&d.genres),
            poster_url: d.poster_path.as_deref().map(poster_url),
            backdrop_url: d.backdrop_path.as_deref().map(original_url),
            homepage: d.homepage.clone().unwrap_or_default(),
            external_ids: external_ids(d.external_ids.as_ref()),
            cast: cast_members(&d.credits.cast, opts.cast_limit),
            crew_summary: crew_summary(&d.credits.crew),
            trailer_url: trailer_url(&d.videos.results),
            images: gallery(&d.images, opts.image_cap),
            series: None,
        },
        RawDetail::Series(d) => CanonicalMedia {
            id: d.id,
            kind: MediaKind::Series,
            title: d.name.clone().unwrap_or_default(),
            original_title: d.original_name.clone().unwrap_or_default(),
            tagline: d.tagline.clone().unwrap_or_default(),
            overview: d.overview.clone().unwrap_or_default(),
            release_date: d.first_air_date.clone().unwrap_or_default(),
            runtime_minutes: d.episode_run_time.first().copied(),
            rating_average: d.vote_average,
            vote_count: d.vote_count.unwrap_or(0),
            original_language: d.original_language.clone().unwrap_or_default(),
            production_companies: company_names(&d.production_companies),
            genres: genre_names(&d.genres),
            poster_url: d.poster_path.as_deref().map(poster_url),
            backdrop_url: d.backdrop_path.as_deref().map(original_url),
            homepage: d.homepage.clone().unwrap_or_default(),
            external_ids: external_ids(d.external_ids.as_ref()),
            cast: cast_members(&d.credits.cast, opts.cast_limit),
            crew_summary: crew_summary(&d.credits.crew),
            trailer_url: trailer_url(&d.videos.results),
            images: gallery(&d.images, opts.image_cap),
            series: Some(SeriesDetails {
                seasons: d
                    .seasons
                    .iter()
                    .map(|s| SeasonSummary {
                        season_number: s.season_number,
                        name: s.name.clone(),
                        episode_count: s.episode_count,
                        air_date: s.air_date.clone(),
                    })
                    .collect(),
                networks: company_names(&d.networks),
                created_by: d.created_by.iter().map(|c| c.name.clone()).collect(),
                episode_run_times: d.episode_run_time.clone(),
                last_episode_to_air: d.last_episode_to_air.as_ref().map(episode_stub),
                next_episode_to_air: d.next_episode_to_air.as_ref().map(episode_stub),
            }),
        },
    }
}

/// Pick the trailer watch URL from the video list.
///
/// Trailer-typed videos with a site that loosely matches YouTube win. The
/// fallback only accepts an exact-case `"YouTube"` site, which the loose
/// match above already covers, so it never selects anything the first pass
/// rejected. Legacy behavior, preserved verbatim pending product sign-off.
fn trailer_url(videos: &[Video]) -> String {
    let trailers: Vec<&Video> = videos
        .iter()
        .filter(|v| v.kind.to_lowercase().contains("trailer"))
        .collect();

    if let Some(v) = trailers
        .iter()
        .find(|v| v.site.to_lowercase().contains("youtube"))
    {
        return watch_url(&v.key);
    }

    match trailers.first() {
        Some(v) if v.site == "YouTube" => watch_url(&v.key),
        _ => String::new(),
    }
}

fn watch_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}

fn cast_members(cast: &[CastCredit], limit: usize) -> Vec<CastMember> {
    cast.iter()
        .take(limit)
        .map(|c| CastMember {
            name: c.name.clone(),
            character: c.character.clone().unwrap_or_default(),
            profile_url: c.profile_path.as_deref().map(profile_url),
        })
        .collect()
}

fn crew_summary(crew: &[CrewCredit]) -> CrewSummary {
    let mut summary = CrewSummary::default();
    for member in crew {
        let Some(job) = member.job.as_deref() else {
            continue;
        };
        let job = job.to_lowercase();
        // Exact match for directors, substring for the rest; one person can
        // land in several buckets.
        if job == "director" {
            summary.directors.push(member.name.clone());
        }
        if job.contains("writer") {
            summary.writers.push(member.name.clone());
        }
        if job.contains("producer") {
            summary.producers.push(member.name.clone());
        }
        if job.contains("composer") {
            summary.composers.push(member.name.clone());
        }
    }
    summary
}

/// Backdrops first, then posters; entries without a file path are dropped and
/// the total is capped.
fn gallery(images: &ImageList, cap: usize) -> Vec<ImageRef> {
    images
        .backdrops
        .iter()
        .chain(images.posters.iter())
        .filter_map(artwork_ref)
        .take(cap)
        .collect()
}

fn artwork_ref(art: &Artwork) -> Option<ImageRef> {
    let path = art.file_path.as_deref().filter(|p| !p.is_empty())?;
    Some(ImageRef {
        url: original_url(path),
        width: art.width,
        height: art.height,
        language_code: art.iso_639_1.clone(),
    })
}

fn company_names(companies: &[Company]) -> Vec<String> {
    companies.iter().map(|c| c.name.clone()).collect()
}

fn genre_names(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.name.clone()).collect()
}

fn episode_stub(ep: &crate::raw::Episode) -> EpisodeStub {
    EpisodeStub {
        season_number: ep.season_number,
        episode_number: ep.episode_number,
        name: ep.name.clone(),
        air_date: ep.air_date.clone(),
    }
}

fn external_ids(ids: Option<&serde_json::Value>) -> serde_json::Value {
    ids.cloned()
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
}

fn poster_url(path: &str) -> String {
    format!("{IMAGE_BASE}/w500{path}")
}

fn original_url(path: &str) -> String {
    format!("{IMAGE_BASE}/original{path}")
}

fn profile_url(path: &str) -> String {
    format!("{IMAGE_BASE}/w185{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{MovieDetail, SeriesDetail};
    use serde_json::json;

    fn movie(value: serde_json::Value) -> RawDetail {
        let detail: MovieDetail = serde_json::from_value(value).unwrap();
        RawDetail::Movie(detail)
    }

    fn series(value: serde_json::Value) -> RawDetail {
        let detail: SeriesDetail = serde_json::from_value(value).unwrap();
        RawDetail::Series(detail)
    }

    #[test]
    fn movie_fields_normalize_from_full_payload() {
        let raw = movie(json!({
            "id": 27205,
            "title": "Inception",
            "original_title": "Inception",
            "tagline": "Your mind is the scene of the crime.",
            "overview": "A thief who steals corporate secrets...",
            "release_date": "2010-07-16",
            "runtime": 148,
            "vote_average": 8.4,
            "vote_count": 34000,
            "original_language": "en",
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "homepage": "https://example.com/inception",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ],
            "production_companies": [ { "name": "Warner Bros." } ],
            "external_ids": { "imdb_id": "tt1375666" },
            "credits": {
                "cast": [
                    { "name": "Leonardo DiCaprio", "character": "Cobb", "profile_path": "/leo.jpg" }
                ],
                "crew": [
                    { "name": "Christopher Nolan", "job": "Director" }
                ]
            },
            "videos": { "results": [
                { "key": "YoHD9XEInc0", "site": "YouTube", "type": "Trailer" }
            ]}
        }));

        let media = normalize(&raw);
        assert_eq!(media.kind, MediaKind::Movie);
        assert_eq!(media.title, "Inception");
        assert_eq!(media.release_date, "2010-07-16");
        assert_eq!(media.runtime_minutes, Some(148));
        assert!((media.rating_average.unwrap() - 8.4).abs() < 0.01);
        assert_eq!(media.vote_count, 34000);
        assert_eq!(media.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(media.production_companies, vec!["Warner Bros."]);
        assert_eq!(
            media.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            media.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg")
        );
        assert_eq!(media.external_ids["imdb_id"], "tt1375666");
        assert_eq!(media.cast.len(), 1);
        assert_eq!(media.cast[0].character, "Cobb");
        assert_eq!(
            media.cast[0].profile_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/leo.jpg")
        );
        assert_eq!(media.crew_summary.directors, vec!["Christopher Nolan"]);
        assert_eq!(
            media.trailer_url,
            "https://www.youtube.com/watch?v=YoHD9XEInc0"
        );
        assert!(media.series.is_none());
    }

    #[test]
    fn sparse_movie_degrades_to_documented_defaults() {
        let media = normalize(&movie(json!({ "id": 1 })));
        assert_eq!(media.title, "");
        assert_eq!(media.release_date, "");
        assert_eq!(media.runtime_minutes, None);
        assert_eq!(media.rating_average, None);
        assert_eq!(media.vote_count, 0);
        assert_eq!(media.trailer_url, "");
        assert_eq!(media.homepage, "");
        assert!(media.external_ids.as_object().unwrap().is_empty());
        assert!(media.cast.is_empty());
        assert!(media.images.is_empty());
    }

    #[test]
    fn zero_runtime_is_treated_as_absent() {
        let media = normalize(&movie(json!({ "id": 1, "runtime": 0 })));
        assert_eq!(media.runtime_minutes, None);
    }

    #[test]
    fn series_fields_resolve_from_tv_schema() {
        let raw = series(json!({
            "id": 1396,
            "name": "Breaking Bad",
            "original_name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "episode_run_time": [45, 47],
            "production_companies": [ { "name": "Sony Pictures Television" } ],
            "networks": [ { "name": "AMC" } ],
            "created_by": [ { "name": "Vince Gilligan" } ],
            "seasons": [
                { "season_number": 1, "name": "Season 1", "episode_count": 7, "air_date": "2008-01-20" }
            ],
            "last_episode_to_air": {
                "season_number": 5, "episode_number": 16, "name": "Felina", "air_date": "2013-09-29"
            }
        }));

        let media = normalize(&raw);
        assert_eq!(media.kind, MediaKind::Series);
        assert_eq!(media.title, "Breaking Bad");
        assert_eq!(media.release_date, "2008-01-20");
        assert_eq!(media.runtime_minutes, Some(45));

        let details = media.series.unwrap();
        // Networks stay a separate field, not folded into companies.
        assert_eq!(media.production_companies, vec!["Sony Pictures Television"]);
        assert_eq!(details.networks, vec!["AMC"]);
        assert_eq!(details.created_by, vec!["Vince Gilligan"]);
        assert_eq!(details.episode_run_times, vec![45, 47]);
        assert_eq!(details.seasons.len(), 1);
        assert_eq!(details.last_episode_to_air.unwrap().name, "Felina");
        assert!(details.next_episode_to_air.is_none());
    }

    #[test]
    fn trailer_requires_trailer_typed_video() {
        let media = normalize(&movie(json!({
            "id": 1,
            "videos": { "results": [
                { "key": "a", "site": "YouTube", "type": "Teaser" }
            ]}
        })));
        assert_eq!(media.trailer_url, "");
    }

    #[test]
    fn trailer_prefers_first_youtube_sited_trailer() {
        let media = normalize(&movie(json!({
            "id": 1,
            "videos": { "results": [
                { "key": "b", "site": "Vimeo", "type": "Trailer" },
                { "key": "c", "site": "youtube.com", "type": "Official Trailer" }
            ]}
        })));
        assert_eq!(media.trailer_url, "https://www.youtube.com/watch?v=c");
    }

    // Quirk: the fallback arm demands an exact-case "YouTube" site, which the
    // loose match already accepts, so a Vimeo-only trailer list yields no URL.
    #[test]
    fn trailer_fallback_quirk_rejects_non_youtube_sites() {
        let media = normalize(&movie(json!({
            "id": 1,
            "videos": { "results": [
                { "key": "b", "site": "Vimeo", "type": "Trailer" }
            ]}
        })));
        assert_eq!(media.trailer_url, "");
    }

    #[test]
    fn cast_is_truncated_to_the_limit_in_source_order() {
        let cast: Vec<_> = (0..20)
            .map(|i| json!({ "name": format!("Actor {i}"), "character": format!("Role {i}") }))
            .collect();
        let media = normalize(&movie(json!({
            "id": 1,
            "credits": { "cast": cast, "crew": [] }
        })));
        assert_eq!(media.cast.len(), 12);
        assert_eq!(media.cast[0].name, "Actor 0");
        assert_eq!(media.cast[11].name, "Actor 11");
    }

    #[test]
    fn cast_limit_is_configurable() {
        let cast: Vec<_> = (0..25).map(|i| json!({ "name": format!("A{i}") })).collect();
        let raw = movie(json!({ "id": 1, "credits": { "cast": cast, "crew": [] } }));
        let opts = NormalizeOptions {
            cast_limit: 20,
            ..NormalizeOptions::default()
        };
        assert_eq!(normalize_with(&raw, &opts).cast.len(), 20);
    }

    #[test]
    fn crew_roles_partition_with_shared_membership() {
        let media = normalize(&movie(json!({
            "id": 1,
            "credits": { "cast": [], "crew": [
                { "name": "A", "job": "Director" },
                { "name": "B", "job": "Screenwriter" },
                { "name": "C", "job": "Executive Producer" },
                { "name": "D", "job": "Writer/Producer" },
                { "name": "E", "job": "Original Music Composer" },
                { "name": "F", "job": "director" }
            ]}
        })));
        assert_eq!(media.crew_summary.directors, vec!["A", "F"]);
        assert_eq!(media.crew_summary.writers, vec!["B", "D"]);
        assert_eq!(media.crew_summary.producers, vec!["C", "D"]);
        assert_eq!(media.crew_summary.composers, vec!["E"]);
    }

    #[test]
    fn gallery_concatenates_backdrops_then_posters_and_caps_at_thirty() {
        let backdrops: Vec<_> = (0..40)
            .map(|i| json!({ "file_path": format!("/b{i}.jpg"), "width": 1920, "height": 1080 }))
            .collect();
        let posters: Vec<_> = (0..10)
            .map(|i| json!({ "file_path": format!("/p{i}.jpg") }))
            .collect();
        let media = normalize(&movie(json!({
            "id": 1,
            "images": { "backdrops": backdrops, "posters": posters }
        })));
        assert_eq!(media.images.len(), 30);
        assert_eq!(
            media.images[0].url,
            "https://image.tmdb.org/t/p/original/b0.jpg"
        );
        assert_eq!(
            media.images[29].url,
            "https://image.tmdb.org/t/p/original/b29.jpg"
        );
    }

    #[test]
    fn gallery_drops_entries_without_a_file_path() {
        let media = normalize(&movie(json!({
            "id": 1,
            "images": { "backdrops": [
                { "width": 1920 },
                { "file_path": "", "width": 1920 },
                { "file_path": "/keep.jpg", "iso_639_1": "en" }
            ], "posters": [] }
        })));
        assert_eq!(media.images.len(), 1);
        assert_eq!(
            media.images[0].url,
            "https://image.tmdb.org/t/p/original/keep.jpg"
        );
        assert_eq!(media.images[0].language_code.as_deref(), Some("en"));
    }
}
