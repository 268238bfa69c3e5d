#[cfg(test)]
mod tests {
    use crate::database::entity::{comment, post, user};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use quill_core::domain::{Comment, Post, User};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, CommentRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_post_by_id() {
        // Create mock database with expected query results
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                title: "Test Post".to_owned(),
                body: "Content".to_owned(),
                likes: 0,
                posted_date: now.into(),
                last_edited_date: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.likes, 0);
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "alice".to_owned(),
                email: "alice@example.com".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_username("alice").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, user_id);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_list_comments_for_post() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                comment::Model {
                    id: uuid::Uuid::new_v4(),
                    post_id,
                    author_id,
                    body: "first".to_owned(),
                    likes: 0,
                    posted_date: now.into(),
                    last_edited_date: now.into(),
                },
                comment::Model {
                    id: uuid::Uuid::new_v4(),
                    post_id,
                    author_id,
                    body: "second".to_owned(),
                    likes: 0,
                    posted_date: now.into(),
                    last_edited_date: now.into(),
                },
            ]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let result: Vec<Comment> = repo.list_by_post(post_id).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.post_id == post_id));
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
