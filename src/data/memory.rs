//! In-memory post store backing the test suite, so every test runs against
//! an isolated instance with no database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostPatch};

pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, DomainError> {
        let mut stored = Vec::with_capacity(posts.len());
        let mut guard = self.posts.write().await;
        for mut post in posts {
            post.validate()?;
            post.id = Uuid::new_v4();
            guard.insert(post.id, post.clone());
            stored.push(post);
        }
        Ok(stored)
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        post.validate()?;
        let mut guard = self.posts.write().await;
        guard.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let guard = self.posts.read().await;
        Ok(guard.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let guard = self.posts.read().await;
        Ok(guard.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let mut guard = self.posts.write().await;
        match guard.get_mut(&id) {
            Some(post) => {
                patch.apply(post);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut guard = self.posts.write().await;
        guard.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::Author;

    fn sample_post(title: &str) -> Post {
        Post::new(
            Author {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
            },
            title.into(),
            "some content".into(),
        )
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(sample_post("Hi")).await.unwrap();

        let found = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Hi");
        assert_eq!(found.id, post.id);
    }

    #[tokio::test]
    async fn create_rejects_empty_field() {
        let repo = InMemoryPostRepository::new();
        let mut post = sample_post("Hi");
        post.content = String::new();

        let err = repo.create(post).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(field) if field == "content"));
    }

    #[tokio::test]
    async fn insert_many_assigns_fresh_ids() {
        let repo = InMemoryPostRepository::new();
        let seed = vec![sample_post("a"), sample_post("b"), sample_post("c")];
        let original_ids: Vec<Uuid> = seed.iter().map(|p| p.id).collect();

        let stored = repo.insert_many(seed).await.unwrap();
        assert_eq!(stored.len(), 3);
        for post in &stored {
            assert!(!original_ids.contains(&post.id));
        }

        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(sample_post("Hi")).await.unwrap();

        let patch = PostPatch {
            title: Some("updated blog".into()),
            content: None,
        };
        let updated = repo.update(post.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "updated blog");
        assert_eq!(updated.content, "some content");
        assert_eq!(updated.id, post.id);
    }

    #[tokio::test]
    async fn update_absent_id_yields_none() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(Uuid::new_v4(), PostPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(sample_post("Hi")).await.unwrap();

        repo.delete(post.id).await.unwrap();
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());

        // Second delete of the same id is still a success.
        repo.delete(post.id).await.unwrap();
    }
}
