//! In-process repositories used when no database URL is configured.
//!
//! State lives for the lifetime of the process only. Uniqueness rules match
//! the Postgres schema so the service layer sees the same errors either way.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(users: &HashMap<UserId, User>, candidate: &User) -> Result<(), UserError> {
    for existing in users.values().filter(|u| u.id != candidate.id) {
        if existing.username == candidate.username {
            return Err(UserError::UsernameAlreadyExists(
                candidate.username.to_string(),
            ));
        }
        if existing.email == candidate.email {
            return Err(UserError::EmailAlreadyExists(candidate.email.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product)
            }
            None => Err(ProductError::NotFound(product.id.to_string())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        self.products
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::product::models::Label;
    use crate::domain::product::models::Price;
    use crate::domain::user::models::Age;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    fn user(username: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            age: Age::new(30).unwrap(),
            is_active: true,
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(),
            name: Label::new(name.to_string()).unwrap(),
            category: Label::new("Tools".to_string()).unwrap(),
            price: Price::new(9.99).unwrap(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_user_lookup_by_email_and_username() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("alice", "a@b.com")).await.unwrap();

        let by_email = repo.find_by_email("a@b.com").await.unwrap().unwrap();
        let by_username = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(by_email.id, created.id);
        assert_eq!(by_username.id, created.id);
        assert!(repo.find_by_email("x@y.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_uniqueness_is_enforced() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("alice", "a@b.com")).await.unwrap();

        assert!(matches!(
            repo.create(user("alice", "other@b.com")).await,
            Err(UserError::UsernameAlreadyExists(_))
        ));
        assert!(matches!(
            repo.create(user("bob", "a@b.com")).await,
            Err(UserError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_user_update_keeps_own_email() {
        let repo = InMemoryUserRepository::new();
        let mut alice = repo.create(user("alice", "a@b.com")).await.unwrap();
        repo.create(user("bob", "bob@b.com")).await.unwrap();

        alice.is_active = false;
        let updated = repo.update(alice.clone()).await.unwrap();
        assert!(!updated.is_active);

        alice.email = EmailAddress::new("bob@b.com".to_string()).unwrap();
        assert!(matches!(
            repo.update(alice).await,
            Err(UserError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_user_update_and_delete_missing() {
        let repo = InMemoryUserRepository::new();
        let ghost = user("ghost", "g@b.com");

        assert!(matches!(
            repo.update(ghost.clone()).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(&ghost.id).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_products_listed_newest_first() {
        let repo = InMemoryProductRepository::new();
        let mut older = product("Hammer");
        older.created_at = Utc::now() - Duration::minutes(5);
        repo.create(older).await.unwrap();
        repo.create(product("Wrench")).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name.to_string())
            .collect();

        assert_eq!(names, vec!["Wrench", "Hammer"]);
    }

    #[tokio::test]
    async fn test_product_update_and_delete() {
        let repo = InMemoryProductRepository::new();
        let mut hammer = repo.create(product("Hammer")).await.unwrap();

        hammer.price = Price::new(12.0).unwrap();
        repo.update(hammer.clone()).await.unwrap();
        let stored = repo.find_by_id(&hammer.id).await.unwrap().unwrap();
        assert_eq!(stored.price.value(), 12.0);

        repo.delete(&hammer.id).await.unwrap();
        assert!(repo.find_by_id(&hammer.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&hammer.id).await,
            Err(ProductError::NotFound(_))
        ));
    }
}
