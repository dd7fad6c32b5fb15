//! Default avatar URL derivation
//!
//! Derives a Gravatar URL from the account email using SHA-256 address
//! hashing. Only URL construction happens here; image generation is
//! the avatar service's business.

use sha2::{Digest, Sha256};

use crate::config::AvatarConfig;
use crate::domain::normalize_email;

const SECURE_ORIGIN: &str = "https://secure.gravatar.com";
const PLAIN_ORIGIN: &str = "http://www.gravatar.com";

/// Resolves default avatar URLs from email addresses
#[derive(Debug, Clone)]
pub struct GravatarResolver {
    default_style: String,
    secure: bool,
}

impl GravatarResolver {
    pub fn new(config: &AvatarConfig) -> Self {
        Self {
            default_style: config.default_style.clone(),
            secure: config.secure,
        }
    }

    /// Derive the avatar URL for an email
    ///
    /// The email is normalized before hashing so casing and stray
    /// whitespace never change the derived address.
    pub fn url_for(&self, email: &str) -> String {
        let digest = Sha256::digest(normalize_email(email).as_bytes());
        let origin = if self.secure {
            SECURE_ORIGIN
        } else {
            PLAIN_ORIGIN
        };

        format!(
            "{}/avatar/{}?d={}",
            origin,
            hex::encode(digest),
            self.default_style
        )
    }
}

impl Default for GravatarResolver {
    fn default() -> Self {
        Self::new(&AvatarConfig::default())
    }
}
