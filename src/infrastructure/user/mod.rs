//! User infrastructure module
//!
//! Concrete implementations for user account management: credential
//! hashing with Argon2, gravatar derivation, in-memory and PostgreSQL
//! repositories, schema migrations, and the user service.

mod avatar;
mod migrations;
mod password;
mod postgres_repository;
mod repository;
mod service;

pub use avatar::GravatarResolver;
pub use migrations::{user_migrations, Migration, PostgresMigrator};
pub use password::{Argon2Hasher, CredentialHasher, Credentials};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{SignupRequest, UserService};
