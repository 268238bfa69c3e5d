use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// Fixed feed page size. Both the front page and per-user feeds use it.
pub const FEED_PAGE_SIZE: u64 = 10;

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number as requested.
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting an absent entity is an error.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Users are provisioned elsewhere; this service only reads them.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository with the feed queries.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest `posted_date` first, in pages of [`FEED_PAGE_SIZE`].
    /// `page` is 1-based; a page past the end yields an empty item list.
    async fn list_page(&self, page: u64) -> Result<Page<Post>, RepoError>;

    /// One author's posts, same ordering and pagination as [`list_page`].
    ///
    /// [`list_page`]: PostRepository::list_page
    async fn list_by_author_page(&self, author_id: Uuid, page: u64)
    -> Result<Page<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// A post's comments, oldest first.
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
