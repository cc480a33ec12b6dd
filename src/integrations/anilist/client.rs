// src/integrations/anilist/client.rs
//
// AniList API integration
//
// ARCHITECTURE:
// - GraphQL client for the AniList API
// - Handles authentication, rate limiting, error classification
// - Maps the external `Media` shape into the domain `Anime` record
// - AniList's `search:` argument only looks at titles, so genre matches are
//   fetched separately through `genre_in:` and merged in
//
// RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Every transport or API failure surfaces as a typed AppError

use crate::domain::{Anime, AnimeFormat, AnimeStatus};
use crate::error::{AppError, AppResult};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;

pub const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";

/// Results per page for search queries
const PAGE_SIZE: u32 = 25;

const MEDIA_FIELDS: &str = r#"
    id
    title {
        romaji
        english
        native
    }
    coverImage {
        large
    }
    description(asHtml: false)
    genres
    episodes
    status
    format
"#;

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(rename = "Page")]
    page: PageData,
}

#[derive(Debug, Deserialize)]
struct PageData {
    media: Vec<MediaData>,
}

#[derive(Debug, Deserialize)]
struct GenreData {
    #[serde(rename = "GenreCollection")]
    genres: Vec<String>,
}

/// Media data from AniList
#[derive(Debug, Deserialize)]
struct MediaData {
    id: i64,
    title: TitleData,
    #[serde(rename = "coverImage")]
    cover_image: Option<CoverImageData>,
    description: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    episodes: Option<u32>,
    status: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TitleData {
    romaji: Option<String>,
    english: Option<String>,
    native: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoverImageData {
    large: Option<String>,
}

/// Keeps requests at least `min_interval` apart.
/// Waiting is an async sleep, so no runtime thread is ever parked.
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// AniList API Client
pub struct AniListClient {
    base_url: String,
    http_client: Client,
    rate_limiter: Mutex<RateLimiter>,
    auth_token: Option<String>,
    /// Fetched once per client; the genre list changes very rarely
    genres: OnceCell<Vec<String>>,
}

impl AniListClient {
    /// Create a new AniList client against the public endpoint
    pub fn new() -> AppResult<Self> {
        Self::with_base_url(ANILIST_ENDPOINT)
    }

    /// Create a client against another endpoint (mirrors, test servers)
    pub fn with_base_url(base_url: &str) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            http_client,
            // 1 request per second
            rate_limiter: Mutex::new(RateLimiter::new(Duration::from_millis(1000))),
            auth_token: None,
            genres: OnceCell::new(),
        })
    }

    /// Attach a bearer token to every request
    pub fn with_auth(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Search for anime whose titles or genres match `query`.
    ///
    /// An empty query returns the first page of the most popular titles.
    /// Otherwise title hits come first, followed by popular titles from every
    /// genre whose name contains the query.
    pub async fn search_anime(&self, query: &str) -> AppResult<Vec<Anime>> {
        if query.is_empty() {
            return self.popular_page().await;
        }

        let title_hits = self.search_by_title(query).await?;

        let genres = matching_genres(self.genre_collection().await?, query);
        if genres.is_empty() {
            return Ok(title_hits);
        }

        let genre_hits = self.search_by_genres(&genres).await?;
        Ok(merge_candidates(title_hits, genre_hits))
    }

    /// Every genre name AniList knows about
    async fn genre_collection(&self) -> AppResult<&[String]> {
        let genres = self
            .genres
            .get_or_try_init(|| async {
                let data: GenreData = self
                    .execute_query("query { GenreCollection }", json!({}))
                    .await?;
                log::debug!("Loaded {} AniList genres", data.genres.len());
                Ok::<_, AppError>(data.genres)
            })
            .await?;

        Ok(genres.as_slice())
    }

    async fn popular_page(&self) -> AppResult<Vec<Anime>> {
        let graphql_query = format!(
            r#"query ($perPage: Int) {{
                Page(page: 1, perPage: $perPage) {{
                    media(type: ANIME, sort: POPULARITY_DESC) {{ {} }}
                }}
            }}"#,
            MEDIA_FIELDS
        );

        self.fetch_page(&graphql_query, json!({ "perPage": PAGE_SIZE }))
            .await
    }

    async fn search_by_title(&self, query: &str) -> AppResult<Vec<Anime>> {
        let graphql_query = format!(
            r#"query ($search: String, $perPage: Int) {{
                Page(page: 1, perPage: $perPage) {{
                    media(search: $search, type: ANIME) {{ {} }}
                }}
            }}"#,
            MEDIA_FIELDS
        );

        self.fetch_page(
            &graphql_query,
            json!({ "search": query, "perPage": PAGE_SIZE }),
        )
        .await
    }

    async fn search_by_genres(&self, genres: &[String]) -> AppResult<Vec<Anime>> {
        let graphql_query = format!(
            r#"query ($genres: [String], $perPage: Int) {{
                Page(page: 1, perPage: $perPage) {{
                    media(genre_in: $genres, type: ANIME, sort: POPULARITY_DESC) {{ {} }}
                }}
            }}"#,
            MEDIA_FIELDS
        );

        self.fetch_page(
            &graphql_query,
            json!({ "genres": genres, "perPage": PAGE_SIZE }),
        )
        .await
    }

    async fn fetch_page(
        &self,
        graphql_query: &str,
        variables: serde_json::Value,
    ) -> AppResult<Vec<Anime>> {
        let response_data: SearchData = self.execute_query(graphql_query, variables).await?;
        Ok(page_to_anime(response_data))
    }

    // ========================================================================
    // INTERNAL: GraphQL Execution
    // ========================================================================

    async fn execute_query<T>(&self, query: &str, variables: serde_json::Value) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.rate_limiter.lock().await.wait_if_needed().await;

        let body = json!({
            "query": query,
            "variables": variables
        });

        let mut request = self
            .http_client
            .post(&self.base_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &self.auth_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.json(&body).send().await.map_err(|e| {
            log::warn!("AniList request failed: {}", e);
            AppError::Unavailable(format!("AniList API request failed: {}", e))
        })?;

        let status = response.status();

        // AniList reports GraphQL errors with a JSON body even on 4xx
        let graphql_response: GraphQLResponse<T> = response.json().await.map_err(|e| {
            if status.is_success() {
                AppError::Unavailable(format!("Failed to parse AniList response: {}", e))
            } else {
                classify_status(status, &format!("AniList API returned status: {}", status))
            }
        })?;

        if let Some(errors) = graphql_response.errors {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            let error_status = errors
                .iter()
                .find_map(|e| e.status)
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(status);

            return Err(classify_status(
                error_status,
                &format!("AniList API errors: {}", messages.join(", ")),
            ));
        }

        if !status.is_success() {
            return Err(classify_status(
                status,
                &format!("AniList API returned status: {}", status),
            ));
        }

        graphql_response
            .data
            .ok_or_else(|| AppError::Unavailable("AniList API returned no data".to_string()))
    }
}

/// Map an HTTP status into the error taxonomy
fn classify_status(status: StatusCode, message: &str) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message.to_string()),
        StatusCode::BAD_REQUEST => AppError::InvalidInput(message.to_string()),
        _ => AppError::Unavailable(message.to_string()),
    }
}

/// Genres whose name contains `query`, case-insensitively
fn matching_genres(genres: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    genres
        .iter()
        .filter(|genre| genre.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Title hits in order, then genre hits not already present
fn merge_candidates(mut title_hits: Vec<Anime>, genre_hits: Vec<Anime>) -> Vec<Anime> {
    for anime in genre_hits {
        if !title_hits.iter().any(|existing| existing.id == anime.id) {
            title_hits.push(anime);
        }
    }
    title_hits
}

fn page_to_anime(data: SearchData) -> Vec<Anime> {
    data.page.media.into_iter().map(map_media_to_anime).collect()
}

fn map_media_to_anime(media: MediaData) -> Anime {
    Anime {
        id: media.id,
        title_english: media.title.english,
        title_romaji: media.title.romaji,
        title_native: media.title.native,
        cover_image: media.cover_image.and_then(|c| c.large),
        description: media.description,
        genres: media.genres,
        episodes: media.episodes,
        // AniList models seasons as separate media entries
        seasons: None,
        status: media.status.as_deref().map(AnimeStatus::from_code),
        format: media.format.as_deref().map(AnimeFormat::from_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_client_creation() {
        let client = AniListClient::new().unwrap();
        assert_eq!(client.base_url, "https://graphql.anilist.co");
        assert!(client.auth_token.is_none());
    }

    #[test]
    fn test_client_with_auth() {
        let client = AniListClient::new()
            .unwrap()
            .with_auth("test_token".to_string());
        assert!(client.auth_token.is_some());
    }

    #[test]
    fn test_media_mapping() {
        let json = r#"{
            "id": 16498,
            "title": {
                "romaji": "Shingeki no Kyojin",
                "english": "Attack on Titan",
                "native": "進撃の巨人"
            },
            "coverImage": { "large": "https://img.anili.st/16498.jpg" },
            "description": "Several hundred years ago...",
            "genres": ["Action", "Drama"],
            "episodes": 25,
            "status": "FINISHED",
            "format": "TV"
        }"#;

        let media: MediaData = serde_json::from_str(json).unwrap();
        let anime = map_media_to_anime(media);

        assert_eq!(anime.id, 16498);
        assert_eq!(anime.display_title(), "Attack on Titan");
        assert_eq!(anime.alternative_title(), Some("Shingeki no Kyojin"));
        assert_eq!(anime.cover_image.as_deref(), Some("https://img.anili.st/16498.jpg"));
        assert_eq!(anime.status, Some(AnimeStatus::Finished));
        assert_eq!(anime.format, Some(AnimeFormat::Tv));
        assert_eq!(anime.seasons, None);
    }

    #[test]
    fn test_media_mapping_tolerates_missing_fields() {
        let json = r#"{
            "id": 7,
            "title": { "romaji": null, "english": null, "native": "未定" },
            "coverImage": null,
            "description": null,
            "genres": [],
            "episodes": null,
            "status": "SOMETHING_NEW",
            "format": null
        }"#;

        let anime = map_media_to_anime(serde_json::from_str(json).unwrap());
        assert_eq!(anime.display_title(), "未定");
        assert_eq!(anime.status, Some(AnimeStatus::Unknown));
        assert_eq!(anime.format, None);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, "gone").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, "bad").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down").kind(),
            ErrorKind::Unavailable
        );
    }

    fn page(json: &str) -> Vec<Anime> {
        let response: GraphQLResponse<SearchData> = serde_json::from_str(json).unwrap();
        page_to_anime(response.data.unwrap())
    }

    #[test]
    fn test_genre_only_matches_are_merged_into_title_hits() {
        let collection: GraphQLResponse<GenreData> = serde_json::from_str(
            r#"{ "data": { "GenreCollection": ["Action", "Comedy", "Slice of Life"] } }"#,
        )
        .unwrap();
        let genres = matching_genres(&collection.data.unwrap().genres, "action");
        assert_eq!(genres, vec!["Action".to_string()]);

        let title_hits = page(
            r#"{ "data": { "Page": { "media": [
                { "id": 101, "title": { "romaji": "Action Heroine Cheer Fruits", "english": null, "native": null },
                  "genres": ["Comedy"] }
            ] } } }"#,
        );
        let genre_hits = page(
            r#"{ "data": { "Page": { "media": [
                { "id": 16498, "title": { "romaji": "Shingeki no Kyojin", "english": "Attack on Titan", "native": null },
                  "genres": ["Action", "Drama"] },
                { "id": 101, "title": { "romaji": "Action Heroine Cheer Fruits", "english": null, "native": null },
                  "genres": ["Comedy"] }
            ] } } }"#,
        );

        let merged = merge_candidates(title_hits, genre_hits);
        let ids: Vec<i64> = merged.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![101, 16498]);
        assert!(merged.iter().all(|anime| anime.matches_query("action")));
    }

    #[test]
    fn test_query_matching_no_genre_adds_nothing() {
        let genres = vec!["Action".to_string(), "Romance".to_string()];
        assert!(matching_genres(&genres, "titan").is_empty());
        assert_eq!(matching_genres(&genres, "ROM"), vec!["Romance".to_string()]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        // Port 9 (discard) on localhost refuses connections
        let client = AniListClient::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.search_anime("titan").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(1000));
        let start = Instant::now();

        limiter.wait_if_needed().await;
        limiter.wait_if_needed().await;

        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
