use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{
    error::DomainError,
    post::{Author, Post, PostPatch},
};
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn create_post(
        &self,
        author: Author,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        let post = Post::new(author, title, content);
        post.validate()?;
        self.repo.create(post).await
    }

    #[instrument(skip(self))]
    pub async fn update_post(&self, post_id: Uuid, patch: PostPatch) -> Result<Post, DomainError> {
        match self.repo.update(post_id, patch).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(DomainError::PostNotFound(post_id)),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(post_id).await
    }

    /// Seeding entry point for fixtures; not reachable from any route.
    pub async fn seed_posts(&self, posts: Vec<Post>) -> Result<Vec<Post>, DomainError> {
        self.repo.insert_many(posts).await
    }
}
