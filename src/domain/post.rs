use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Author of a post, persisted as two separate name fields.
///
/// The flattened display form ("First Last") only exists on the wire; it is
/// computed by [`Author::display_name`] and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Durable storage shape of a blog post. The wire shape lives in
/// `presentation::dto::PostView`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl Post {
    pub fn new(author: Author, title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            title,
            content,
            created: Utc::now(),
        }
    }

    /// Checks the required fields of a candidate document. Runs before any
    /// persistence attempt so an invalid document never reaches the store.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("author.firstName", &self.author.first_name)?;
        require_non_empty("author.lastName", &self.author.last_name)?;
        require_non_empty("title", &self.title)?;
        require_non_empty("content", &self.content)?;
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        Err(DomainError::Validation(field.to_string()))
    } else {
        Ok(())
    }
}

/// Fields a partial update may touch. Author and creation timestamp are
/// deliberately absent; they are immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        }
    }

    #[test]
    fn display_name_joins_with_single_space() {
        assert_eq!(author().display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_does_not_trim() {
        let a = Author {
            first_name: " Ada".into(),
            last_name: "Lovelace ".into(),
        };
        assert_eq!(a.display_name(), " Ada Lovelace ");
    }

    #[test]
    fn new_post_assigns_fresh_id() {
        let a = Post::new(author(), "Hi".into(), "World".into());
        let b = Post::new(author(), "Hi".into(), "World".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn validate_accepts_complete_post() {
        let post = Post::new(author(), "Hi".into(), "World".into());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_required_fields() {
        let mut post = Post::new(author(), "Hi".into(), "World".into());
        post.title = String::new();
        match post.validate() {
            Err(DomainError::Validation(field)) => assert_eq!(field, "title"),
            other => panic!("expected validation error, got {:?}", other),
        }

        let mut post = Post::new(author(), "Hi".into(), "World".into());
        post.author.last_name = String::new();
        match post.validate() {
            Err(DomainError::Validation(field)) => assert_eq!(field, "author.lastName"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let mut post = Post::new(author(), "Hi".into(), "World".into());
        let id = post.id;
        let created = post.created;

        let patch = PostPatch {
            title: Some("updated blog".into()),
            content: None,
        };
        patch.apply(&mut post);

        assert_eq!(post.title, "updated blog");
        assert_eq!(post.content, "World");
        assert_eq!(post.id, id);
        assert_eq!(post.created, created);
        assert_eq!(post.author, author());
    }
}
