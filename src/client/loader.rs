use log::{error, info};

use super::api::{ApiError, PostApi};
use super::types::Post;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Post identifier must not be empty")]
    EmptyId,

    #[error("Failed to load post {id}: {source}")]
    Api {
        id: String,
        #[source]
        source: ApiError,
    },
}

/// What the user sees while the initial fetch is outstanding.
pub fn loading_notice(id: &str) -> String {
    format!("Loading post {}…", id.trim())
}

/// Fetches the post a detail view is initialized from.
///
/// Runs once per navigation, before anything is drawn. Failures are not
/// retried here; the caller treats them as a failed page load.
pub async fn load_post(api: &dyn PostApi, id: &str) -> Result<Post, LoadError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(LoadError::EmptyId);
    }

    match api.get_post(id).await {
        Ok(post) => {
            info!("Loaded post {} ({} likes)", post.id, post.like_count());
            Ok(post)
        }
        Err(source) => {
            error!("Loading post {} failed: {}", id, source);
            Err(LoadError::Api {
                id: id.to_string(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::MockPostApi;
    use crate::client::types::{Asset, Author, Video};
    use mockall::predicate::eq;

    fn sample_post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            caption: "caption".into(),
            video: Video {
                asset: Asset {
                    url: "https://cdn.example.com/v.mp4".into(),
                },
            },
            posted_by: Author {
                id: "u1".into(),
                user_name: "author".into(),
                image: String::new(),
            },
            likes: vec![],
            comments: vec![],
        }
    }

    #[tokio::test]
    async fn test_load_post_fetches_once_by_id() {
        let mut api = MockPostApi::new();
        api.expect_get_post()
            .with(eq("abc123"))
            .times(1)
            .returning(|id| Ok(sample_post(id)));

        let post = load_post(&api, "abc123").await.unwrap();
        assert_eq!(post.id, "abc123");
    }

    #[test]
    fn test_loading_notice_names_the_post() {
        assert_eq!(loading_notice(" abc123 "), "Loading post abc123…");
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_without_a_request() {
        let mut api = MockPostApi::new();
        api.expect_get_post().never();

        assert!(matches!(load_post(&api, "  ").await, Err(LoadError::EmptyId)));
    }

    #[tokio::test]
    async fn test_not_found_propagates() {
        let mut api = MockPostApi::new();
        api.expect_get_post()
            .returning(|id| Err(ApiError::NotFound(id.to_string())));

        let err = load_post(&api, "gone").await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Api { ref id, source: ApiError::NotFound(_) } if id == "gone"
        ));
    }
}
