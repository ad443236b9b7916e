use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};
#[cfg(test)]
use mockall::automock;
use reqwest::StatusCode;
use url::Url;

use super::types::{LikeRequest, LikeResponse, Post};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Rate limited")]
    RateLimited,

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// The two endpoints the detail view talks to.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostApi: Send + Sync {
    async fn get_post(&self, id: &str) -> Result<Post, ApiError>;
    async fn update_like(&self, request: &LikeRequest) -> Result<LikeResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct API {
    client: reqwest::Client,
    base_url: Url,
}

impl API {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check_status(
        response: reqwest::Response,
        not_found: impl FnOnce() -> ApiError,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(match status {
            StatusCode::NOT_FOUND => not_found(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::NotAuthenticated,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            _ => ApiError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            },
        })
    }
}

#[async_trait]
impl PostApi for API {
    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let url = self.endpoint(&["api", "post", id])?;
        info!("Fetching post {} from {}", id, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;
        let response = Self::check_status(response, || ApiError::NotFound(id.to_string())).await?;

        response.json::<Post>().await.map_err(|e| {
            error!("Failed to decode post {}: {:?}", id, e);
            ApiError::Decode(e.to_string())
        })
    }

    async fn update_like(&self, request: &LikeRequest) -> Result<LikeResponse, ApiError> {
        let url = self.endpoint(&["api", "like"])?;
        info!(
            "Sending like={} for post {} as {}",
            request.like, request.post_id, request.user_id
        );

        let response = self
            .client
            .put(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;
        let response =
            Self::check_status(response, || ApiError::NotFound(request.post_id.clone())).await?;

        response
            .json::<LikeResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> API {
        API::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn post_json(id: &str, likes: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "caption": "hello",
            "video": { "asset": { "url": "https://cdn.example.com/v.mp4" } },
            "postedBy": { "_id": "author", "userName": "author", "image": "" },
            "likes": likes.iter().map(|u| serde_json::json!({ "_ref": u })).collect::<Vec<_>>(),
            "comments": []
        })
    }

    #[tokio::test]
    async fn test_get_post_hits_post_by_id_resource() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/post/abc123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(post_json("abc123", &["a", "b"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let post = api_for(&server).get_post("abc123").await.unwrap();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.like_count(), 2);
    }

    #[tokio::test]
    async fn test_get_post_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/post/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = api_for(&server).get_post("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_get_post_reports_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = api_for(&server).get_post("abc123").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn test_update_like_puts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/like"))
            .and(body_json(serde_json::json!({
                "userId": "viewer",
                "postId": "abc123",
                "like": true
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(post_json("abc123", &["a", "viewer"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = api_for(&server)
            .update_like(&LikeRequest {
                user_id: "viewer".into(),
                post_id: "abc123".into(),
                like: true,
            })
            .await
            .unwrap();
        assert_eq!(response.like_count(), 2);
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/studio/api/post/xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json("xyz", &[])))
            .mount(&server)
            .await;

        let api = API::new(&format!("{}/studio/", server.uri()), Duration::from_secs(5)).unwrap();
        assert_eq!(api.get_post("xyz").await.unwrap().id, "xyz");
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        assert!(matches!(
            API::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
