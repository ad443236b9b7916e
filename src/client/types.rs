use serde::{Deserialize, Serialize};

/// A video post as served by `GET /api/post/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub caption: String,
    pub video: Video,
    pub posted_by: Author,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub likes: Vec<LikeRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user_ref == user_id)
    }

    pub fn media_url(&self) -> Option<&str> {
        let url = self.video.asset.url.trim();
        if url.is_empty() {
            None
        } else {
            Some(url)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub asset: Asset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub image: String,
}

/// One entry of a post's like-holder set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRef {
    #[serde(rename = "_ref")]
    pub user_ref: String,
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub posted_by: Option<CommentAuthor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(rename = "_id", alias = "_ref")]
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Body of `PUT /api/like`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_id: String,
    pub post_id: String,
    pub like: bool,
}

/// The only part of the like endpoint's reply we consume.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LikeResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub likes: Vec<LikeRef>,
}

impl LikeResponse {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_from_api_shape() {
        let raw = r#"{
            "_id": "abc123",
            "caption": "sunset over the bay",
            "video": { "asset": { "_id": "file-1", "url": "https://cdn.example.com/v.mp4" } },
            "postedBy": { "_id": "u1", "userName": "marina", "image": "https://cdn.example.com/a.png" },
            "likes": [ { "_key": "k1", "_ref": "u2" }, { "_key": "k2", "_ref": "u3" } ],
            "comments": [ { "comment": "wow", "postedBy": { "_ref": "u2" } } ]
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.posted_by.user_name, "marina");
        assert_eq!(post.like_count(), 2);
        assert_eq!(post.comment_count(), 1);
        assert!(post.is_liked_by("u3"));
        assert!(!post.is_liked_by("u1"));
        assert_eq!(post.media_url(), Some("https://cdn.example.com/v.mp4"));
    }

    #[test]
    fn test_missing_or_null_likes_are_empty() {
        let raw = r#"{
            "_id": "p",
            "video": { "asset": { "url": "" } },
            "postedBy": { "_id": "u1", "userName": "x" },
            "likes": null
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.like_count(), 0);
        assert_eq!(post.comment_count(), 0);
        assert_eq!(post.media_url(), None);
    }

    #[test]
    fn test_like_request_uses_camel_case_keys() {
        let body = serde_json::to_value(LikeRequest {
            user_id: "u1".into(),
            post_id: "abc123".into(),
            like: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "userId": "u1", "postId": "abc123", "like": false })
        );
    }

    #[test]
    fn test_like_response_ignores_other_fields() {
        let raw = r#"{ "_id": "abc123", "caption": "c", "likes": [ { "_ref": "u1" } ] }"#;
        let response: LikeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.like_count(), 1);
    }
}
