//! Social identity providers linked to an account

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Known social identity providers
///
/// A closed set: lookups address a provider through this enum rather
/// than a runtime-built field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Facebook,
    Twitter,
}

impl SocialProvider {
    /// All known providers
    pub const ALL: [SocialProvider; 2] = [SocialProvider::Facebook, SocialProvider::Twitter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
        }
    }

    /// Parse a provider name as reported by an identity source
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "facebook" => Some(Self::Facebook),
            "twitter" => Some(Self::Twitter),
            _ => None,
        }
    }
}

impl std::fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider-specific profile payloads attached to a user
///
/// Payloads are opaque: whatever the identity source returned, stored
/// as JSON. The only field this crate interprets is `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfiles {
    #[serde(skip_serializing_if = "Option::is_none")]
    facebook: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    twitter: Option<Value>,
}

impl SocialProfiles {
    /// Get the stored payload for a provider
    pub fn get(&self, provider: SocialProvider) -> Option<&Value> {
        match provider {
            SocialProvider::Facebook => self.facebook.as_ref(),
            SocialProvider::Twitter => self.twitter.as_ref(),
        }
    }

    /// Replace the stored payload for a provider
    pub fn set(&mut self, provider: SocialProvider, payload: Value) {
        match provider {
            SocialProvider::Facebook => self.facebook = Some(payload),
            SocialProvider::Twitter => self.twitter = Some(payload),
        }
    }

    /// Remove the stored payload for a provider
    pub fn clear(&mut self, provider: SocialProvider) {
        match provider {
            SocialProvider::Facebook => self.facebook = None,
            SocialProvider::Twitter => self.twitter = None,
        }
    }

    /// The `id` value inside a provider payload, if any
    pub fn provider_id(&self, provider: SocialProvider) -> Option<&Value> {
        self.get(provider).and_then(|payload| payload.get("id"))
    }

    /// Whether any provider has a payload
    pub fn is_empty(&self) -> bool {
        self.facebook.is_none() && self.twitter.is_none()
    }
}

/// A (provider, id) pair identifying one linked social account
///
/// The id stays a JSON value: identity sources report both string and
/// numeric ids, and `"123"` must not match `123`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub provider: SocialProvider,
    pub id: Value,
}

impl ProviderRef {
    pub fn new(provider: SocialProvider, id: impl Into<Value>) -> Self {
        Self {
            provider,
            id: id.into(),
        }
    }
}
