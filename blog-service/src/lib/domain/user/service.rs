use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

/// Hash a password on a blocking worker.
///
/// Argon2 is CPU-heavy by design; keeping it off the async workers means
/// one registration cannot stall unrelated in-flight requests.
async fn hash_password(password: String) -> Result<String, UserError> {
    tokio::task::spawn_blocking(move || PasswordHasher::new().hash(&password))
        .await
        .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))?
        .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Policy check comes first: a rejected password never reaches the
        // hasher or the store.
        PasswordPolicy::validate(&command.password)
            .map_err(|e| UserError::WeakPassword(e.to_string()))?;

        let password_hash = hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            bio: None,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_bio) = command.bio {
            user.bio = Some(new_bio);
        }

        self.repository.update(user).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    fn register_command(password: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            name: "Test User".to_string(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.name == "Test User"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "abcd1234"
                    && user.bio.is_none()
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let result = service.register_user(register_command("abcd1234")).await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.email.as_str(), "test@example.com");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_user_weak_password_never_touches_store() {
        let mut repository = MockTestUserRepository::new();

        // No record may be created for a rejected password
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        for password in ["short1", "lettersonly", "12345678", "abcd 1234", ""] {
            let result = service.register_user(register_command(password)).await;
            assert!(
                matches!(result, Err(UserError::WeakPassword(_))),
                "password {:?} should be rejected",
                password
            );
        }
    }

    #[tokio::test]
    async fn test_register_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service.register_user(register_command("abcd1234")).await;
        assert!(matches!(
            result,
            Err(UserError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user_by_email("missing@example.com").await;
        assert!(matches!(result, Err(UserError::NotFoundByEmail(_))));
    }

    fn existing_user(id: UserId) -> User {
        User {
            id,
            name: "Old Name".to_string(),
            email: EmailAddress::new("old@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$old_hash".to_string(),
            bio: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_profile_changes_only_name_and_bio() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let stored = existing_user(user_id);

        let returned = stored.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|user| {
                user.name == "New Name"
                    && user.bio.as_deref() == Some("Writes about Rust")
                    // Email and password hash must be untouched
                    && user.email.as_str() == "old@example.com"
                    && user.password_hash == "$argon2id$old_hash"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateProfileCommand {
            name: Some("New Name".to_string()),
            bio: Some("Writes about Rust".to_string()),
        };

        let result = service.update_profile(&user_id, command).await;
        assert!(result.is_ok());

        let updated = result.unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.bio.as_deref(), Some("Writes about Rust"));
    }

    #[tokio::test]
    async fn test_update_profile_is_idempotent() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let mut stored = existing_user(user_id);
        stored.name = "New Name".to_string();
        stored.bio = Some("Writes about Rust".to_string());

        let returned = stored.clone();
        repository
            .expect_find_by_id()
            .times(2)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|user| {
                user.name == "New Name" && user.bio.as_deref() == Some("Writes about Rust")
            })
            .times(2)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        // Applying the same update twice converges on the same stored state
        for _ in 0..2 {
            let command = UpdateProfileCommand {
                name: Some("New Name".to_string()),
                bio: Some("Writes about Rust".to_string()),
            };
            let updated = service.update_profile(&user_id, command).await.unwrap();
            assert_eq!(updated.name, "New Name");
            assert_eq!(updated.bio.as_deref(), Some("Writes about Rust"));
        }
    }

    #[tokio::test]
    async fn test_update_profile_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateProfileCommand {
            name: Some("New Name".to_string()),
            bio: None,
        };

        let result = service.update_profile(&UserId::new(), command).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
