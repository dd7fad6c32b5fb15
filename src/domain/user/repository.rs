//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use super::profile::ProviderRef;
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// `find_by_email` matches the stored value byte-for-byte. Stored
/// emails are already normalized, so callers lower-case and trim input
/// themselves; the query path adds no normalization of its own.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Find the single user with the given stored email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find the single user whose linked profile for the referenced
    /// provider carries the referenced id
    async fn find_by_provider(&self, provider: &ProviderRef) -> Result<Option<User>, DomainError>;

    /// Create a new user; the email must not already be registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// List users ordered by the (first_name, last_name) index
    async fn list_by_name(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
