//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::{SocialProfiles, SocialProvider};
use super::validation::{
    normalize_email, validate_email, validate_profile_picture_url, UserValidationError,
};

/// User identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user notification preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Notify on replies to the user's content
    #[serde(default = "default_replies")]
    pub replies: bool,
    /// Notify when a new topic is opened
    #[serde(rename = "new-topic", default)]
    pub new_topic: bool,
}

fn default_replies() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            replies: true,
            new_topic: false,
        }
    }
}

/// User account record
///
/// The email is the unique sign-in identifier and is normalized
/// (lower-cased, trimmed) on every write. Credential material (hash,
/// salt) never appears in serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    /// Avatar URL, derived from the email at signup when not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    /// Sign-in identifier, stored lower-cased and trimmed
    email: String,
    #[serde(default)]
    email_validated: bool,
    /// Linked social identity payloads
    #[serde(default)]
    profiles: SocialProfiles,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last modification timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    /// Must use a secure scheme when present
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_picture_url: Option<String>,
    /// Presence marks the account disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    disabled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    notifications: NotificationPreferences,
    /// Credential hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    hash: Option<String>,
    /// Credential salt - never exposed in serialization
    #[serde(skip_serializing, default)]
    salt: Option<String>,
}

impl User {
    /// Create a new user with the given email
    pub fn new(email: impl AsRef<str>) -> Self {
        Self {
            id: UserId::generate(),
            first_name: None,
            last_name: None,
            username: None,
            avatar: None,
            email: normalize_email(email.as_ref()),
            email_validated: false,
            profiles: SocialProfiles::default(),
            created_at: Utc::now(),
            updated_at: None,
            profile_picture_url: None,
            disabled_at: None,
            notifications: NotificationPreferences::default(),
            hash: None,
            salt: None,
        }
    }

    /// Rebuild a user from persisted state
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
        username: Option<String>,
        avatar: Option<String>,
        email: String,
        email_validated: bool,
        profiles: SocialProfiles,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        profile_picture_url: Option<String>,
        disabled_at: Option<DateTime<Utc>>,
        notifications: NotificationPreferences,
        hash: Option<String>,
        salt: Option<String>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            username,
            avatar,
            email,
            email_validated,
            profiles,
            created_at,
            updated_at,
            profile_picture_url,
            disabled_at,
            notifications,
            hash,
            salt,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn email_validated(&self) -> bool {
        self.email_validated
    }

    pub fn profiles(&self) -> &SocialProfiles {
        &self.profiles
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }

    pub fn disabled_at(&self) -> Option<DateTime<Utc>> {
        self.disabled_at
    }

    pub fn notifications(&self) -> &NotificationPreferences {
        &self.notifications
    }

    pub(crate) fn credential_hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub(crate) fn credential_salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Whether password credentials have been initialized
    pub fn has_credentials(&self) -> bool {
        self.hash.is_some()
    }

    // Derived name accessors

    /// Full name computed from the stored name fields
    ///
    /// Present fields are joined with a single space; `None` when
    /// neither field is set.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Set the name fields by splitting a full name on whitespace
    ///
    /// The first token becomes the first name, the remaining tokens
    /// rejoined with single spaces become the last name. A name with
    /// no tokens changes nothing.
    pub fn set_full_name(&mut self, name: &str) -> &mut Self {
        let mut tokens = name.split_whitespace();

        if let Some(first) = tokens.next() {
            let rest: Vec<&str> = tokens.collect();

            self.first_name = Some(first.to_string());
            self.last_name = if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            };
            self.touch();
        }

        self
    }

    // Mutators

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> &mut Self {
        self.first_name = Some(first_name.into());
        self.touch();
        self
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> &mut Self {
        self.last_name = Some(last_name.into());
        self.touch();
        self
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.username = Some(username.into());
        self.touch();
        self
    }

    pub fn set_avatar(&mut self, avatar: impl Into<String>) -> &mut Self {
        self.avatar = Some(avatar.into());
        self.touch();
        self
    }

    /// Update the email, normalizing it for storage
    pub fn set_email(&mut self, email: impl AsRef<str>) -> &mut Self {
        self.email = normalize_email(email.as_ref());
        self.touch();
        self
    }

    /// Mark the email address as validated
    pub fn mark_email_validated(&mut self) -> &mut Self {
        self.email_validated = true;
        self.touch();
        self
    }

    /// Set the profile picture URL; rejects non-secure schemes
    pub fn set_profile_picture_url(
        &mut self,
        url: impl Into<String>,
    ) -> Result<&mut Self, UserValidationError> {
        let url = url.into();
        validate_profile_picture_url(&url)?;

        self.profile_picture_url = Some(url);
        self.touch();
        Ok(self)
    }

    pub fn set_notifications(&mut self, notifications: NotificationPreferences) -> &mut Self {
        self.notifications = notifications;
        self.touch();
        self
    }

    /// Attach a social identity payload for a provider
    pub fn link_provider(
        &mut self,
        provider: SocialProvider,
        payload: serde_json::Value,
    ) -> &mut Self {
        self.profiles.set(provider, payload);
        self.touch();
        self
    }

    /// Detach a provider's social identity payload
    pub fn unlink_provider(&mut self, provider: SocialProvider) -> &mut Self {
        self.profiles.clear(provider);
        self.touch();
        self
    }

    pub(crate) fn set_credentials(
        &mut self,
        hash: impl Into<String>,
        salt: impl Into<String>,
    ) -> &mut Self {
        self.hash = Some(hash.into());
        self.salt = Some(salt.into());
        self.touch();
        self
    }

    // Status

    /// Whether the account is currently disabled
    pub fn is_disabled(&self) -> bool {
        self.disabled_at.is_some()
    }

    /// Disable the account
    pub fn disable(&mut self) -> &mut Self {
        if self.disabled_at.is_none() {
            self.disabled_at = Some(Utc::now());
            self.touch();
        }
        self
    }

    /// Re-enable a disabled account
    pub fn enable(&mut self) -> &mut Self {
        if self.disabled_at.is_some() {
            self.disabled_at = None;
            self.touch();
        }
        self
    }

    /// Check every declared field constraint
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_email(&self.email)?;

        if let Some(url) = &self.profile_picture_url {
            validate_profile_picture_url(url)?;
        }

        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
