//! In-memory repository implementations - used as fallback when no database
//! is configured. Note: Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, FEED_PAGE_SIZE, Page, PostRepository, UserRepository,
};

/// Shared backing store. Users, posts and comments live together so that
/// deleting a post drops its comments the way the schema cascade does.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

/// Sort newest first and slice out one fixed-size page. `page` is 1-based.
fn paginate(mut posts: Vec<Post>, page: u64) -> Page<Post> {
    posts.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));

    let total_items = posts.len() as u64;
    let total_pages = total_items.div_ceil(FEED_PAGE_SIZE);
    let start = page.saturating_sub(1).saturating_mul(FEED_PAGE_SIZE);

    let items = posts
        .into_iter()
        .skip(start as usize)
        .take(FEED_PAGE_SIZE as usize)
        .collect();

    Page {
        items,
        page: page.max(1),
        per_page: FEED_PAGE_SIZE,
        total_items,
        total_pages,
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.store.posts.write().await;
        if posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        drop(posts);

        // Cascade, mirroring the comments table's ON DELETE CASCADE.
        let mut comments = self.store.comments.write().await;
        comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_page(&self, page: u64) -> Result<Page<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(paginate(posts.values().cloned().collect(), page))
    }

    async fn list_by_author_page(
        &self,
        author_id: Uuid,
        page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        let mine = posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(paginate(mine, page))
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCommentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.store.comments.read().await.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.store.comments.write().await;
        if comments.contains_key(&comment.id) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.store.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .comments
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.store.comments.read().await;
        let mut under_post: Vec<Comment> = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        under_post.sort_by(|a, b| a.posted_date.cmp(&b.posted_date));
        Ok(under_post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn post_at(author: Uuid, offset_secs: i64, title: &str) -> Post {
        let mut post = Post::new(author, title.to_string(), "body".to_string());
        post.posted_date += TimeDelta::seconds(offset_secs);
        post.last_edited_date = post.posted_date;
        post
    }

    #[tokio::test]
    async fn feed_is_newest_first_in_pages_of_ten() {
        let store = MemoryStore::new();
        let repo = InMemoryPostRepository::new(store);
        let author = Uuid::new_v4();

        for i in 0..25 {
            repo.insert(post_at(author, i, &format!("post {i}"))).await.unwrap();
        }

        let first = repo.list_page(1).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].title, "post 24");
        assert_eq!(first.total_items, 25);
        assert_eq!(first.total_pages, 3);
        assert!(
            first
                .items
                .windows(2)
                .all(|w| w[0].posted_date >= w[1].posted_date)
        );

        let last = repo.list_page(3).await.unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[4].title, "post 0");

        let beyond = repo.list_page(4).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 25);
    }

    #[tokio::test]
    async fn author_feed_only_contains_their_posts() {
        let store = MemoryStore::new();
        let repo = InMemoryPostRepository::new(store);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.insert(post_at(alice, 0, "hers")).await.unwrap();
        repo.insert(post_at(bob, 1, "his")).await.unwrap();

        let feed = repo.list_by_author_page(alice, 1).await.unwrap();
        assert_eq!(feed.items.len(), 1);
        assert!(feed.items.iter().all(|p| p.author_id == alice));
    }

    #[tokio::test]
    async fn deleting_a_post_drops_its_comments() {
        let store = MemoryStore::new();
        let posts = InMemoryPostRepository::new(store.clone());
        let comments = InMemoryCommentRepository::new(store);
        let author = Uuid::new_v4();

        let post = posts.insert(post_at(author, 0, "doomed")).await.unwrap();
        let other = posts.insert(post_at(author, 1, "kept")).await.unwrap();

        comments
            .insert(Comment::new(post.id, author, "first".into()))
            .await
            .unwrap();
        comments
            .insert(Comment::new(post.id, author, "second".into()))
            .await
            .unwrap();
        let survivor = comments
            .insert(Comment::new(other.id, author, "unrelated".into()))
            .await
            .unwrap();

        posts.delete(post.id).await.unwrap();

        assert!(comments.list_by_post(post.id).await.unwrap().is_empty());
        let kept = comments.list_by_post(other.id).await.unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, survivor.id);
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let repo = InMemoryPostRepository::new(store);

        let result = repo.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn find_user_by_username() {
        let store = MemoryStore::new();
        let repo = InMemoryUserRepository::new(store);

        let alice = User::new("alice".into(), "alice@example.com".into());
        repo.insert(alice.clone()).await.unwrap();

        let found = repo.find_by_username("alice").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(alice.id));

        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }
}
