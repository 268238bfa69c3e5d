use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ownership::Authored;

/// Comment entity - an authored reply attached to exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Parent post. Immutable after creation.
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub likes: i32,
    pub posted_date: DateTime<Utc>,
    pub last_edited_date: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on `post_id` authored by `author_id`.
    pub fn new(post_id: Uuid, author_id: Uuid, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            body,
            likes: 0,
            posted_date: now,
            last_edited_date: now,
        }
    }

    /// Apply an edit by `editor`: replace the body, reassign the author and
    /// bump `last_edited_date`. The parent post reference never changes.
    pub fn apply_edit(&mut self, editor: Uuid, body: String) {
        self.author_id = editor;
        self.body = body;
        self.last_edited_date = Utc::now();
    }
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_edit_never_touches_parent_post() {
        let post_id = Uuid::new_v4();
        let author = Uuid::new_v4();
        let mut comment = Comment::new(post_id, author, "first".into());

        comment.apply_edit(author, "edited".into());

        assert_eq!(comment.post_id, post_id);
        assert_eq!(comment.body, "edited");
        assert!(comment.last_edited_date >= comment.posted_date);
    }
}
