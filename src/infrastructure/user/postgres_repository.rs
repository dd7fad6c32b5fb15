//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::{
    DomainError, NotificationPreferences, ProviderRef, SocialProfiles, User, UserId,
    UserRepository,
};

const USER_COLUMNS: &str = "id, first_name, last_name, username, avatar, email, \
     email_validated, profiles, created_at, updated_at, profile_picture_url, \
     disabled_at, notify_replies, notify_new_topic, hash, salt";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool from configuration and wrap it
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| {
                DomainError::configuration(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find user by email: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn find_by_provider(&self, provider: &ProviderRef) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE profiles -> $1 -> 'id' = $2",
            USER_COLUMNS
        ))
        .bind(provider.provider.as_str())
        .bind(Json(&provider.id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find user by provider: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, username, avatar, email,
                               email_validated, profiles, created_at, updated_at,
                               profile_picture_url, disabled_at, notify_replies,
                               notify_new_topic, hash, salt)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.username())
        .bind(user.avatar())
        .bind(user.email())
        .bind(user.email_validated())
        .bind(Json(user.profiles()))
        .bind(user.created_at())
        .bind(user.updated_at())
        .bind(user.profile_picture_url())
        .bind(user.disabled_at())
        .bind(user.notifications().replies)
        .bind(user.notifications().new_topic)
        .bind(user.credential_hash())
        .bind(user.credential_salt())
        .execute(&self.pool)
        .await
        .map_err(|e| translate_write_error(e, &user))?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, username = $4, avatar = $5,
                email = $6, email_validated = $7, profiles = $8, updated_at = $9,
                profile_picture_url = $10, disabled_at = $11, notify_replies = $12,
                notify_new_topic = $13, hash = $14, salt = $15
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.username())
        .bind(user.avatar())
        .bind(user.email())
        .bind(user.email_validated())
        .bind(Json(user.profiles()))
        .bind(user.updated_at())
        .bind(user.profile_picture_url())
        .bind(user.disabled_at())
        .bind(user.notifications().replies)
        .bind(user.notifications().new_topic)
        .bind(user.credential_hash())
        .bind(user.credential_salt())
        .execute(&self.pool)
        .await
        .map_err(|e| translate_write_error(e, user))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_name(&self) -> Result<Vec<User>, DomainError> {
        // NULLS FIRST matches the in-memory index ordering
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users \
             ORDER BY first_name NULLS FIRST, last_name NULLS FIRST, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut users = Vec::with_capacity(rows.len());

        for row in rows {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn translate_write_error(err: sqlx::Error, user: &User) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::conflict(format!("Email '{}' already in use", user.email()));
        }
    }

    DomainError::storage(format!("Failed to write user: {}", err))
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let profiles: Json<SocialProfiles> = row
        .try_get("profiles")
        .map_err(|e| DomainError::storage(format!("Invalid profiles column: {}", e)))?;

    Ok(User::restore(
        UserId::from_uuid(row.get("id")),
        row.get("first_name"),
        row.get("last_name"),
        row.get("username"),
        row.get("avatar"),
        row.get("email"),
        row.get("email_validated"),
        profiles.0,
        row.get("created_at"),
        row.get("updated_at"),
        row.get("profile_picture_url"),
        row.get("disabled_at"),
        NotificationPreferences {
            replies: row.get("notify_replies"),
            new_topic: row.get("notify_new_topic"),
        },
        row.get("hash"),
        row.get("salt"),
    ))
}
