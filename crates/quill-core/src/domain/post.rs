use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ownership::Authored;

/// Post entity - a top-level authored content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    /// Like counter. Persisted and surfaced, but not mutated by this service.
    pub likes: i32,
    /// Set once at creation, never changes afterwards.
    pub posted_date: DateTime<Utc>,
    /// Bumped on every edit. Always >= `posted_date`.
    pub last_edited_date: DateTime<Utc>,
}

impl Post {
    /// Create a new post authored by `author_id`.
    pub fn new(author_id: Uuid, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            body,
            likes: 0,
            posted_date: now,
            last_edited_date: now,
        }
    }

    /// Apply an edit by `editor`: replace title and body, reassign the author
    /// to the editor (idempotent under the ownership gate) and bump
    /// `last_edited_date`. `posted_date` stays untouched.
    pub fn apply_edit(&mut self, editor: Uuid, title: String, body: String) {
        self.author_id = editor;
        self.title = title;
        self.body = body;
        self.last_edited_date = Utc::now();
    }
}

impl Authored for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_starts_unliked_with_equal_dates() {
        let post = Post::new(Uuid::new_v4(), "title".into(), "body".into());

        assert_eq!(post.likes, 0);
        assert_eq!(post.posted_date, post.last_edited_date);
    }

    #[test]
    fn apply_edit_bumps_last_edited_and_keeps_posted_date() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, "title".into(), "body".into());
        let posted = post.posted_date;

        post.apply_edit(author, "new title".into(), "new body".into());

        assert_eq!(post.posted_date, posted);
        assert!(post.last_edited_date >= post.posted_date);
        assert_eq!(post.title, "new title");
        assert_eq!(post.author_id, author);
    }
}
