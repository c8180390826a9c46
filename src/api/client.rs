//! Playmood HTTP client
//!
//! Thin typed wrapper over the backend's REST endpoints. Reads are
//! unauthenticated except the per-user lists; writes take the session token.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ApiError, ApiResult, ApiResultExt};
use crate::models::{CommunityPost, Content, Creator, CreatorSummary, FeedPost, Highlight, Playlist, User};

/// Default backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Playmood API client
#[derive(Debug, Clone)]
pub struct PlaymoodClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
}

impl PlaymoodClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Same client, authenticated with a session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn bearer(&self, token: Option<&str>) -> ApiResult<String> {
        token
            .or(self.token.as_deref())
            .map(|t| format!("Bearer {}", t))
            .ok_or(ApiError::Unauthorized)
    }

    /// Send a request, retrying on 429, and decode the JSON body
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        auth: Option<String>,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header("Accept", "application/json");
            if let Some(auth) = &auth {
                request = request.header("Authorization", auth);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            tracing::debug!(%method, endpoint, "api request");
            let response = request.send().await?;

            match response.status() {
                status if status.is_success() => {
                    let body = response.text().await?;
                    return serde_json::from_str(&body).map_err(|e| {
                        ApiError::InvalidResponse(format!("JSON parse error: {}", e))
                    });
                }
                StatusCode::NOT_FOUND => return Err(ApiError::NotFound),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(ApiError::Unauthorized)
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(ApiError::RateLimited);
                    }
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));
                    tracing::warn!(endpoint, wait_secs, "rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                }
                status => return Err(ApiError::ServerError(status.as_u16())),
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::GET, endpoint, None, None).await
    }

    async fn get_authed<T: DeserializeOwned>(&self, endpoint: &str, token: Option<&str>) -> ApiResult<T> {
        let auth = self.bearer(token)?;
        self.request(Method::GET, endpoint, Some(auth), None).await
    }

    /// Creator sub-resource: a 404 means the creator has none of these
    async fn get_list_or_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<Vec<T>> {
        self.get::<Vec<T>>(endpoint).await.or_empty()
    }

    async fn write_ids(&self, method: Method, endpoint: &str, token: Option<&str>) -> ApiResult<Vec<String>> {
        let auth = self.bearer(token)?;
        let response: IdsResponse = self.request(method, endpoint, Some(auth), None).await?;
        Ok(response.into_ids())
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Whole catalog, in server order
    pub async fn all_content(&self) -> ApiResult<Vec<Content>> {
        self.get("/api/content/").await
    }

    /// Top ten, in server order
    pub async fn top_ten(&self) -> ApiResult<Vec<Content>> {
        self.get("/api/content/top-ten").await
    }

    /// Single content item; `NotFound` when the id is unknown
    pub async fn content(&self, id: &str) -> ApiResult<Content> {
        self.get(&format!("/api/content/{}", urlencoding::encode(id)))
            .await
    }

    // =========================================================================
    // Creators
    // =========================================================================

    pub async fn creators(&self) -> ApiResult<Vec<CreatorSummary>> {
        self.get("/api/users/creators").await
    }

    /// Channel page with the creator's content and about text
    pub async fn channel(&self, creator_id: &str) -> ApiResult<Creator> {
        self.get(&format!("/api/channel/{}", urlencoding::encode(creator_id)))
            .await
    }

    pub async fn feed(&self, creator_id: &str) -> ApiResult<Vec<FeedPost>> {
        self.get_list_or_empty(&format!(
            "/api/feed/user/{}",
            urlencoding::encode(creator_id)
        ))
        .await
    }

    pub async fn highlights(&self, creator_id: &str) -> ApiResult<Vec<Highlight>> {
        self.get_list_or_empty(&format!(
            "/api/highlights/creator/{}",
            urlencoding::encode(creator_id)
        ))
        .await
    }

    pub async fn public_playlists(&self, creator_id: &str) -> ApiResult<Vec<Playlist>> {
        let endpoint = format!(
            "/api/playlists/user/{}/public",
            urlencoding::encode(creator_id)
        );
        let response = self.get::<PlaylistsResponse>(&endpoint).await.or_empty()?;
        Ok(response.playlists)
    }

    pub async fn community(&self, creator_id: &str) -> ApiResult<Vec<CommunityPost>> {
        self.get_list_or_empty(&format!(
            "/api/community/{}",
            urlencoding::encode(creator_id)
        ))
        .await
    }

    // =========================================================================
    // User
    // =========================================================================

    /// Sign in; the returned user carries the session token
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let body = serde_json::to_value(LoginRequest { email, password })
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.request(Method::POST, "/api/users/login", None, Some(&body))
            .await
    }

    /// Content the user liked. Uses `token`, else the client's own.
    pub async fn liked_content(&self, token: Option<&str>) -> ApiResult<Vec<Content>> {
        self.get_authed("/api/users/likes", token).await
    }

    /// Content on the user's watchlist
    pub async fn watchlist(&self, token: Option<&str>) -> ApiResult<Vec<Content>> {
        self.get_authed("/api/content/watchlist/all", token).await
    }

    /// Like; returns the updated list of liked ids
    pub async fn like(&self, content_id: &str, token: Option<&str>) -> ApiResult<Vec<String>> {
        self.write_ids(Method::POST, &likes_path(content_id), token)
            .await
    }

    pub async fn unlike(&self, content_id: &str, token: Option<&str>) -> ApiResult<Vec<String>> {
        self.write_ids(Method::DELETE, &likes_path(content_id), token)
            .await
    }

    /// Add to watchlist; returns the updated list of watchlist ids
    pub async fn add_to_watchlist(&self, content_id: &str, token: Option<&str>) -> ApiResult<Vec<String>> {
        self.write_ids(Method::POST, &watchlist_path(content_id), token)
            .await
    }

    pub async fn remove_from_watchlist(&self, content_id: &str, token: Option<&str>) -> ApiResult<Vec<String>> {
        self.write_ids(Method::DELETE, &watchlist_path(content_id), token)
            .await
    }
}

fn likes_path(content_id: &str) -> String {
    format!("/api/users/likes/{}", urlencoding::encode(content_id))
}

fn watchlist_path(content_id: &str) -> String {
    format!("/api/content/watchlist/{}", urlencoding::encode(content_id))
}

// =============================================================================
// Request / Response Structures (internal)
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct PlaylistsResponse {
    #[serde(default)]
    playlists: Vec<Playlist>,
}

/// Write endpoints answer with the updated id array, bare or wrapped
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdsResponse {
    Bare(Vec<String>),
    Likes { likes: Vec<String> },
    Watchlist { watchlist: Vec<String> },
}

impl IdsResponse {
    fn into_ids(self) -> Vec<String> {
        match self {
            IdsResponse::Bare(ids) => ids,
            IdsResponse::Likes { likes } => likes,
            IdsResponse::Watchlist { watchlist } => watchlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PlaymoodClient::new("http://example.com/");
        assert_eq!(client.base_url(), "http://example.com");
    }

    #[test]
    fn test_bearer_requires_token() {
        let client = PlaymoodClient::new(DEFAULT_API_URL);
        assert!(matches!(client.bearer(None), Err(ApiError::Unauthorized)));
        assert_eq!(client.bearer(Some("t")).unwrap(), "Bearer t");

        let authed = client.with_token("mine");
        assert_eq!(authed.bearer(None).unwrap(), "Bearer mine");
        assert_eq!(authed.bearer(Some("other")).unwrap(), "Bearer other");
    }

    #[test]
    fn test_ids_response_shapes() {
        let bare: IdsResponse = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(bare.into_ids(), vec!["a", "b"]);

        let wrapped: IdsResponse = serde_json::from_str(r#"{"watchlist":["c"]}"#).unwrap();
        assert_eq!(wrapped.into_ids(), vec!["c"]);
    }

    #[test]
    fn test_paths_escape_ids() {
        assert_eq!(likes_path("a b"), "/api/users/likes/a%20b");
        assert_eq!(watchlist_path("c1"), "/api/content/watchlist/c1");
    }
}
