//! User Registry
//!
//! A user-account bounded context: the account record with its field
//! constraints and derived name accessors, lookups by email and by
//! linked social profile, credential initialization and verification,
//! default avatar derivation, and localized duplicate-email messaging.
//!
//! The crate is split into a `domain` layer (entities, validation,
//! repository traits) and an `infrastructure` layer (in-memory and
//! PostgreSQL repositories, Argon2 credential hashing, gravatar
//! resolution, schema migrations, the user service).
//!
//! Typical wiring:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use user_registry::config::AppConfig;
//! use user_registry::infrastructure::{
//!     Argon2Hasher, GravatarResolver, MessageCatalog, PostgresMigrator,
//!     PostgresUserRepository, SignupRequest, UserService,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//!
//! let repository = Arc::new(PostgresUserRepository::connect(&config.database).await?);
//! PostgresMigrator::new(repository.pool().clone()).run().await?;
//!
//! let service = UserService::new(
//!     repository,
//!     Arc::new(Argon2Hasher::new()),
//!     GravatarResolver::new(&config.avatar),
//!     Arc::new(MessageCatalog::new(config.locale.as_str())),
//! );
//!
//! let user = service
//!     .signup(SignupRequest {
//!         full_name: Some("Ada Lovelace".to_string()),
//!         email: "ada@example.com".to_string(),
//!         password: "correct-horse-battery".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    DomainError, NotificationPreferences, ProviderRef, SocialProfiles, SocialProvider, User,
    UserId, UserRepository,
};
pub use infrastructure::{
    Argon2Hasher, CredentialHasher, GravatarResolver, InMemoryUserRepository, MessageCatalog,
    PostgresUserRepository, SignupRequest, UserService,
};
