//! User service for signup, authentication and account management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    normalize_email, validate_password, DomainError, ProviderRef, SocialProvider, User, UserId,
    UserRepository,
};
use crate::infrastructure::i18n::MessageCatalog;

use super::avatar::GravatarResolver;
use super::password::CredentialHasher;

/// Request for creating a new user
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    /// Full name, split into first and last on signup
    pub full_name: Option<String>,
    /// Explicit name fields; take precedence over `full_name`
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: String,
    pub password: String,
    pub profile_picture_url: Option<String>,
}

/// User service composing persistence, credential hashing and avatar
/// derivation as explicit steps
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: CredentialHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    avatars: GravatarResolver,
    messages: Arc<MessageCatalog>,
}

impl<R: UserRepository, H: CredentialHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(
        repository: Arc<R>,
        hasher: Arc<H>,
        avatars: GravatarResolver,
        messages: Arc<MessageCatalog>,
    ) -> Self {
        Self {
            repository,
            hasher,
            avatars,
            messages,
        }
    }

    /// Register a new account
    pub async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        // Entity construction normalizes the email
        let mut user = User::new(&request.email);

        if let Some(full_name) = &request.full_name {
            user.set_full_name(full_name);
        }
        if let Some(first_name) = request.first_name {
            user.set_first_name(first_name);
        }
        if let Some(last_name) = request.last_name {
            user.set_last_name(last_name);
        }
        if let Some(username) = request.username {
            user.set_username(username);
        }
        if let Some(url) = request.profile_picture_url {
            user.set_profile_picture_url(url)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        user.validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        // The store enforces uniqueness atomically; this pre-check owns
        // the localized message
        if self.repository.email_exists(user.email()).await? {
            return Err(DomainError::conflict(
                self.messages.lookup("signup.email.used"),
            ));
        }

        let credentials = self.hasher.derive(&request.password)?;
        user.set_credentials(credentials.hash, credentials.salt);

        if user.avatar().is_none() {
            let avatar_url = self.avatars.url_for(user.email());
            user.set_avatar(avatar_url);
        }

        let user = self.repository.create(user).await?;
        info!(user_id = %user.id(), "user signed up");

        Ok(user)
    }

    /// Authenticate with email and password
    ///
    /// The input email is normalized here; disabled accounts and
    /// accounts without credentials never authenticate. Any mismatch
    /// yields `Ok(None)` rather than an error.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);

        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if user.is_disabled() {
            debug!(user_id = %user.id(), "sign-in refused for disabled account");
            return Ok(None);
        }

        let hash = match user.credential_hash() {
            Some(hash) => hash,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, hash) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Replace the account's password credentials
    pub async fn change_password(
        &self,
        id: UserId,
        new_password: &str,
    ) -> Result<User, DomainError> {
        validate_password(new_password).map_err(|e| DomainError::validation(e.to_string()))?;

        let mut user = self.require(id).await?;

        let credentials = self.hasher.derive(new_password)?;
        user.set_credentials(credentials.hash, credentials.salt);

        self.repository.update(&user).await
    }

    /// Attach a social identity payload to an account
    pub async fn link_provider(
        &self,
        id: UserId,
        provider: SocialProvider,
        payload: serde_json::Value,
    ) -> Result<User, DomainError> {
        let mut user = self.require(id).await?;

        user.link_provider(provider, payload);
        let user = self.repository.update(&user).await?;
        info!(user_id = %user.id(), provider = %provider, "linked social profile");

        Ok(user)
    }

    /// Disable an account
    pub async fn disable(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.require(id).await?;

        user.disable();
        let user = self.repository.update(&user).await?;
        info!(user_id = %user.id(), "account disabled");

        Ok(user)
    }

    /// Re-enable a disabled account
    pub async fn enable(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.require(id).await?;

        user.enable();
        self.repository.update(&user).await
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Find a user by stored email (no input normalization)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.find_by_email(email).await
    }

    /// Find a user by linked social profile id
    pub async fn find_by_provider(
        &self,
        provider: &ProviderRef,
    ) -> Result<Option<User>, DomainError> {
        self.repository.find_by_provider(provider).await
    }

    async fn require(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::password::Argon2Hasher;
    use serde_json::json;

    fn service_with_locale(
        locale: &str,
    ) -> UserService<MockUserRepository, Argon2Hasher> {
        UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
            GravatarResolver::default(),
            Arc::new(MessageCatalog::new(locale)),
        )
    }

    fn service() -> UserService<MockUserRepository, Argon2Hasher> {
        service_with_locale("en")
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "correct-horse-battery".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_signup_normalizes_email() {
        let service = service();

        let user = service.signup(signup_request(" Foo@Bar.com ")).await.unwrap();

        assert_eq!(user.email(), "foo@bar.com");
    }

    #[tokio::test]
    async fn test_signup_initializes_credentials_and_avatar() {
        let service = service();

        let request = SignupRequest {
            full_name: Some("Ada Lovelace".to_string()),
            ..signup_request("ada@example.com")
        };
        let user = service.signup(request).await.unwrap();

        assert!(user.has_credentials());
        assert_eq!(user.full_name().as_deref(), Some("Ada Lovelace"));

        let avatar = user.avatar().expect("avatar should be derived");
        assert!(avatar.starts_with("https://secure.gravatar.com/avatar/"));
        assert!(avatar.ends_with("?d=mm"));
    }

    #[tokio::test]
    async fn test_signup_explicit_name_fields_win() {
        let service = service();

        let request = SignupRequest {
            full_name: Some("Augusta King".to_string()),
            first_name: Some("Ada".to_string()),
            ..signup_request("ada@example.com")
        };
        let user = service.signup(request).await.unwrap();

        assert_eq!(user.first_name(), Some("Ada"));
        assert_eq!(user.last_name(), Some("King"));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_conflict() {
        let service = service();

        service.signup(signup_request("dup@example.com")).await.unwrap();

        // Same email modulo normalization
        let err = service
            .signup(signup_request(" DUP@example.com "))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(err.to_string().contains("Email already in use"));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_message_is_localized() {
        let service = service_with_locale("es");

        service.signup(signup_request("dup@example.com")).await.unwrap();
        let err = service.signup(signup_request("dup@example.com")).await.unwrap_err();

        assert!(err.to_string().contains("ya está en uso"));
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let service = service();

        let request = SignupRequest {
            password: "short".to_string(),
            ..signup_request("p@example.com")
        };
        let err = service.signup(request).await.unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_signup_rejects_insecure_profile_picture() {
        let service = service();

        let request = SignupRequest {
            profile_picture_url: Some("http://cdn.example.com/me.png".to_string()),
            ..signup_request("p@example.com")
        };
        let err = service.signup(request).await.unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_signup_accepts_secure_profile_picture() {
        let service = service();

        let request = SignupRequest {
            profile_picture_url: Some("https://cdn.example.com/me.png".to_string()),
            ..signup_request("p@example.com")
        };
        let user = service.signup(request).await.unwrap();

        assert_eq!(
            user.profile_picture_url(),
            Some("https://cdn.example.com/me.png")
        );
    }

    #[tokio::test]
    async fn test_signup_rejects_malformed_email() {
        let service = service();

        let err = service.signup(signup_request("not-an-email")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let service = service();
        service.signup(signup_request("auth@example.com")).await.unwrap();

        let user = service
            .authenticate("auth@example.com", "correct-horse-battery")
            .await
            .unwrap();
        assert!(user.is_some());

        let wrong = service
            .authenticate("auth@example.com", "wrong-password")
            .await
            .unwrap();
        assert!(wrong.is_none());

        let unknown = service
            .authenticate("nobody@example.com", "correct-horse-battery")
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_normalizes_input_email() {
        let service = service();
        service.signup(signup_request("auth@example.com")).await.unwrap();

        let user = service
            .authenticate("  AUTH@Example.com ", "correct-horse-battery")
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_disabled_account_does_not_authenticate() {
        let service = service();
        let user = service.signup(signup_request("d@example.com")).await.unwrap();

        service.disable(user.id()).await.unwrap();
        let refused = service
            .authenticate("d@example.com", "correct-horse-battery")
            .await
            .unwrap();
        assert!(refused.is_none());

        service.enable(user.id()).await.unwrap();
        let allowed = service
            .authenticate("d@example.com", "correct-horse-battery")
            .await
            .unwrap();
        assert!(allowed.is_some());
    }

    #[tokio::test]
    async fn test_account_without_credentials_does_not_authenticate() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(
            repository.clone(),
            Arc::new(Argon2Hasher::new()),
            GravatarResolver::default(),
            Arc::new(MessageCatalog::default()),
        );

        // Social-login-only record, created without a password
        repository.create(User::new("social@example.com")).await.unwrap();

        let refused = service
            .authenticate("social@example.com", "anything-at-all")
            .await
            .unwrap();
        assert!(refused.is_none());
    }

    #[tokio::test]
    async fn test_change_password() {
        let service = service();
        let user = service.signup(signup_request("pw@example.com")).await.unwrap();

        service
            .change_password(user.id(), "a-brand-new-password")
            .await
            .unwrap();

        let old = service
            .authenticate("pw@example.com", "correct-horse-battery")
            .await
            .unwrap();
        assert!(old.is_none());

        let new = service
            .authenticate("pw@example.com", "a-brand-new-password")
            .await
            .unwrap();
        assert!(new.is_some());
    }

    #[tokio::test]
    async fn test_link_provider_and_find() {
        let service = service();
        let user = service.signup(signup_request("fb@example.com")).await.unwrap();

        service
            .link_provider(user.id(), SocialProvider::Facebook, json!({"id": "123"}))
            .await
            .unwrap();

        let found = service
            .find_by_provider(&ProviderRef::new(SocialProvider::Facebook, "123"))
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id()), Some(user.id()));

        let other_provider = service
            .find_by_provider(&ProviderRef::new(SocialProvider::Twitter, "123"))
            .await
            .unwrap();
        assert!(other_provider.is_none());
    }

    #[tokio::test]
    async fn test_change_password_unknown_user() {
        let service = service();

        let err = service
            .change_password(UserId::generate(), "a-valid-password")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_storage_failures_propagate() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(
            repository.clone(),
            Arc::new(Argon2Hasher::new()),
            GravatarResolver::default(),
            Arc::new(MessageCatalog::default()),
        );

        repository.set_should_fail(true).await;

        let err = service.signup(signup_request("s@example.com")).await.unwrap_err();
        assert!(err.is_storage());

        let err = service.find_by_email("s@example.com").await.unwrap_err();
        assert!(err.is_storage());
    }
}
