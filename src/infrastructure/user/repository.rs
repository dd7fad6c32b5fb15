//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{DomainError, ProviderRef, User, UserId, UserRepository};

type NameKey = (Option<String>, Option<String>, Uuid);

fn name_key(user: &User) -> NameKey {
    (
        user.first_name().map(str::to_string),
        user.last_name().map(str::to_string),
        user.id().as_uuid(),
    )
}

/// In-memory implementation of UserRepository
///
/// Keeps an email index for the unique sign-in identifier and an
/// ordered (first_name, last_name) index for name-ordered listings.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, Uuid>>>,
    /// Ordered (first_name, last_name, id) index
    name_index: Arc<RwLock<BTreeSet<NameKey>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            name_index: Arc::new(RwLock::new(BTreeSet::new())),
        }
    }

    /// Create a repository with initial users
    ///
    /// Panics on duplicate emails in the seed data; seed lists are
    /// build-time fixtures, not caller input.
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = HashMap::new();
        let mut email_map = HashMap::new();
        let mut names = BTreeSet::new();

        for user in users {
            let id = user.id().as_uuid();
            assert!(
                email_map.insert(user.email().to_string(), id).is_none(),
                "duplicate email in seed users: {}",
                user.email()
            );
            names.insert(name_key(&user));
            users_map.insert(id, user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            email_index: Arc::new(RwLock::new(email_map)),
            name_index: Arc::new(RwLock::new(names)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(user_id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn find_by_provider(&self, provider: &ProviderRef) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .find(|u| u.profiles().provider_id(provider.provider) == Some(&provider.id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;
        let mut name_index = self.name_index.write().await;

        let id = user.id().as_uuid();
        let email = user.email().to_string();

        if users.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        if email_index.contains_key(&email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already in use",
                email
            )));
        }

        email_index.insert(email, id);
        name_index.insert(name_key(&user));
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;
        let mut name_index = self.name_index.write().await;

        let id = user.id().as_uuid();

        let old_user = users
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user.id())))?;

        let old_email = old_user.email().to_string();
        let new_email = user.email().to_string();
        let old_name_key = name_key(old_user);

        // If the email changed, check uniqueness and update the index
        if old_email != new_email {
            if email_index.contains_key(&new_email) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already in use",
                    new_email
                )));
            }

            email_index.remove(&old_email);
            email_index.insert(new_email, id);
        }

        name_index.remove(&old_name_key);
        name_index.insert(name_key(user));
        users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;
        let mut name_index = self.name_index.write().await;

        if let Some(user) = users.remove(&id.as_uuid()) {
            email_index.remove(user.email());
            name_index.remove(&name_key(&user));
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_by_name(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let name_index = self.name_index.read().await;

        let result = name_index
            .iter()
            .filter_map(|(_, _, id)| users.get(id).cloned())
            .collect();

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let users = self.users.read().await;
        Ok(users.len())
    }
}
