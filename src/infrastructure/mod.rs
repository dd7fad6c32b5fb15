//! Infrastructure layer - Concrete implementations of the domain seams

pub mod i18n;
pub mod logging;
pub mod user;

pub use i18n::MessageCatalog;
pub use user::{
    user_migrations, Argon2Hasher, CredentialHasher, Credentials, GravatarResolver,
    InMemoryUserRepository, Migration, PostgresMigrator, PostgresUserRepository, SignupRequest,
    UserService,
};
