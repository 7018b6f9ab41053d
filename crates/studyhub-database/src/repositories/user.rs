//! User repository implementation.

use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::result::AppResult;
use studyhub_core::types::UserId;
use studyhub_entity::user::User;

use super::map_write_error;
use crate::connection::DbConnection;

const USER_COLUMNS: &str = "user_id, email, password_hash, created_at";

/// Repository for user rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    /// Find a user by primary key.
    pub async fn find_by_id(
        &self,
        conn: &mut DbConnection,
        user_id: UserId,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"))
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by exact email.
    pub async fn find_by_email(
        &self,
        conn: &mut DbConnection,
        email: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Create a user. A duplicate email surfaces as `Conflict`.
    pub async fn create(
        &self,
        conn: &mut DbConnection,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_write_error(e, "Email already registered", "Failed to create user"))
    }

    /// List all users in creation order.
    pub async fn list(&self, conn: &mut DbConnection) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id ASC"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}

#[cfg(all(test, not(feature = "postgres")))]
mod tests {
    use super::*;
    use crate::test_support::TestDb;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = TestDb::new().await;
        let mut conn = db.conn().await;

        let user = UserRepository
            .create(&mut conn, "student@example.com", "$argon2id$stub")
            .await
            .expect("create");
        let by_email = UserRepository
            .find_by_email(&mut conn, "student@example.com")
            .await
            .expect("find")
            .expect("present");
        assert_eq!(by_email.user_id, user.user_id);
        assert_eq!(by_email.password_hash, "$argon2id$stub");

        let by_id = UserRepository
            .find_by_id(&mut conn, user.user_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(by_id.email, "student@example.com");
        assert!(
            UserRepository
                .find_by_email(&mut conn, "nobody@example.com")
                .await
                .expect("find")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = TestDb::new().await;
        let mut conn = db.conn().await;
        UserRepository
            .create(&mut conn, "dup@example.com", "h")
            .await
            .expect("first");
        let err = UserRepository
            .create(&mut conn, "dup@example.com", "h")
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(UserRepository.list(&mut conn).await.expect("list").len(), 1);
    }
}
