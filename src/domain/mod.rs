//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{
    normalize_email, validate_email, validate_password, validate_profile_picture_url,
    NotificationPreferences, ProviderRef, SocialProfiles, SocialProvider, User, UserId,
    UserRepository, UserValidationError,
};
