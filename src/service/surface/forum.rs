//! Forum surface over the board's HTTP API.
//!
//! Posts are image submissions with a flair; the mission body goes in as a
//! top-level comment so the image renders with the widest client
//! compatibility. Completion swaps the flair and comments on the original
//! post rather than reposting.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;
use crate::service::surface::{ForumComment, ForumPost, ForumSurface};

/// HTTP request timeout for a single forum call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ForumClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    board: String,
    flair_active: String,
    flair_completed: String,
}

#[derive(Deserialize)]
struct PostResponse {
    id: String,
    permalink: String,
}

#[derive(Deserialize)]
struct CommentResponse {
    id: String,
    permalink: String,
}

impl ForumClient {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: config.forum_base_url.trim_end_matches('/').to_string(),
            token: config.forum_api_token.clone(),
            board: config.forum_board.clone(),
            flair_active: config.forum_flair_active.clone(),
            flair_completed: config.forum_flair_completed.clone(),
        }
    }

    fn absolute_url(&self, permalink: &str) -> String {
        if permalink.starts_with("http") {
            permalink.to_string()
        } else {
            format!("{}{}", self.base_url, permalink)
        }
    }

    fn check_status(response: &reqwest::Response) -> Result<(), AppError> {
        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "Forum returned HTTP {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ForumSurface for ForumClient {
    async fn submit_image_post(&self, title: &str, image: &Path) -> Result<ForumPost, AppError> {
        let bytes = tokio::fs::read(image).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("mission.png")
            .mime_str("image/png")?;
        let form = reqwest::multipart::Form::new()
            .text("board", self.board.clone())
            .text("title", title.to_string())
            .text("flair", self.flair_active.clone())
            .part("image", part);

        let response = self
            .client
            .post(format!("{}/api/posts", self.base_url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        Self::check_status(&response)?;

        let post: PostResponse = response.json().await?;
        Ok(ForumPost {
            url: self.absolute_url(&post.permalink),
            id: post.id,
        })
    }

    async fn reply(&self, post_id: &str, body: &str) -> Result<ForumComment, AppError> {
        let response = self
            .client
            .post(format!("{}/api/posts/{}/comments", self.base_url, post_id))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;
        Self::check_status(&response)?;

        let comment: CommentResponse = response.json().await?;
        Ok(ForumComment {
            url: self.absolute_url(&comment.permalink),
            id: comment.id,
        })
    }

    async fn mark_completed(&self, post_id: &str, notice: &str) -> Result<(), AppError> {
        let response = self
            .client
            .patch(format!("{}/api/posts/{}", self.base_url, post_id))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "flair": self.flair_completed }))
            .send()
            .await?;
        Self::check_status(&response)?;

        self.reply(post_id, notice).await?;
        Ok(())
    }
}
