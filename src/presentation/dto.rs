use crate::domain::post::{Author, Post, PostPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: Author,
}

/// Partial update payload. Only `title` and `content` are updatable; anything
/// else submitted in the body is ignored for mutation, except `id`, which the
/// route checks against the path.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn into_patch(self) -> PostPatch {
        PostPatch {
            title: self.title,
            content: self.content,
        }
    }
}

/// Wire representation of a post. `author` is the flattened display string,
/// recomputed from the stored name fields on every projection.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author.display_name(),
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}
