use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
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
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Process-wide password hasher
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Hashing is CPU-bound and runs on the blocking pool.
    async fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.expose().to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            age: command.age,
            is_active: command.is_active,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
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

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_age) = command.age {
            user.age = new_age;
        }

        if let Some(is_active) = command.is_active {
            user.is_active = is_active;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password).await?;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Age;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(8 * 1024, 1, 1).unwrap()
    }

    fn create_command() -> CreateUserCommand {
        CreateUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: Password::new("password123".to_string()).unwrap(),
            age: Age::new(30).unwrap(),
            is_active: true,
        }
    }

    fn existing_user() -> User {
        User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            age: Age::new(30).unwrap(),
            is_active: true,
            password_hash: "$argon2id$stored".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.age.value() == 30
                    && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let user = service.register_user(create_command()).await.unwrap();

        assert_eq!(user.email.as_str(), "test@example.com");
        assert!(fast_hasher().verify("password123", &user.password_hash));
        assert!(!user.password_hash.contains("password123"));
    }

    #[tokio::test]
    async fn test_register_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(existing_user())));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let result = service.register_user(create_command()).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(ref email)) if email == "test@example.com"));
    }

    #[tokio::test]
    async fn test_register_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(existing_user())));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let result = service.register_user(create_command()).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_user_storage_race_surfaces_conflict() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let result = service.register_user(create_command()).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let user_id = UserId::new();
        let result = service.get_user(&user_id).await;
        assert!(matches!(result, Err(UserError::NotFound(ref id)) if *id == user_id.to_string()));
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let result = service.get_user_by_email("nobody@example.com").await;
        assert!(matches!(result, Err(UserError::NotFoundByEmail(_))));
    }

    #[tokio::test]
    async fn test_update_user_applies_only_provided_fields() {
        let user = existing_user();
        let user_id = user.id;
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update()
            .withf(|user| {
                user.age.value() == 31
                    && !user.is_active
                    && user.username.as_str() == "testuser"
                    && user.password_hash == "$argon2id$stored"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let command = UpdateUserCommand {
            age: Some(Age::new(31).unwrap()),
            is_active: Some(false),
            ..Default::default()
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.age.value(), 31);
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let user = existing_user();
        let user_id = user.id;
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update()
            .withf(|user| user.password_hash.starts_with("$argon2id$v="))
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let command = UpdateUserCommand {
            password: Some(Password::new("new-secret".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert!(fast_hasher().verify("new-secret", &updated.password_hash));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository), fast_hasher());

        let result = service.delete_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
