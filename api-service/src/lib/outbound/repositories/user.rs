use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use uuid::Uuid;

use crate::domain::user::models::Age;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_USERS: &str = r#"
    SELECT id, username, email, age, is_active, password_hash, created_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one<T>(&self, column: &str, value: T) -> Result<Option<User>, UserError>
    where
        T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
    {
        let sql = format!("{SELECT_USERS} WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    age: i16,
    is_active: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            age: Age::new(i64::from(row.age))?,
            is_active: row.is_active,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_username_key") {
                return UserError::UsernameAlreadyExists(user.username.to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(user.email.to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, age, is_active, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(i16::from(user.age.value()))
        .bind(user.is_active)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.find_one("id", id.0).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        self.find_one("username", username).await
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let sql = format!("{SELECT_USERS} ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, age = $4, is_active = $5, password_hash = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(i16::from(user.age.value()))
        .bind(user.is_active)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
