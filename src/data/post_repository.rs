use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post, PostPatch};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Durable CRUD over post documents, independent of the wire format.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Bulk-create for seeding and test setup. Every document gets a fresh id
    /// regardless of what the caller passed in.
    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, DomainError>;
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    /// Applies only the fields present in the patch. `None` if no document
    /// with `id` exists.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    /// Set-membership removal: deleting an absent id is a no-op success.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Author is stored as two flat columns; the nested shape is reassembled here.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_first_name: String,
    author_last_name: String,
    title: String,
    content: String,
    created: chrono::DateTime<chrono::Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author: Author {
                first_name: row.author_first_name,
                last_name: row.author_last_name,
            },
            title: row.title,
            content: row.content,
            created: row.created,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, DomainError> {
        let mut stored = Vec::with_capacity(posts.len());
        for mut post in posts {
            post.id = Uuid::new_v4();
            stored.push(self.create(post).await?);
        }
        Ok(stored)
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        post.validate()?;
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_first_name, author_last_name, title, content, created)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id)
        .bind(&post.author.first_name)
        .bind(&post.author.last_name)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_first_name, author_last_name, title, content, created
            FROM posts
            ORDER BY created DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Internal(e.to_string())
        })?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_first_name, author_last_name, title, content, created
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        Ok(row.map(Post::from))
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($1, title),
                content = COALESCE($2, content)
            WHERE id = $3
            RETURNING id, author_first_name, author_last_name, title, content, created
            "#,
        )
        .bind(patch.title)
        .bind(patch.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if row.is_some() {
            info!(post_id = %id, "post updated");
        }

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if result.rows_affected() > 0 {
            info!(post_id = %id, "post deleted");
        }
        Ok(())
    }
}
