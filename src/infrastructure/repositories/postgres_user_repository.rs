use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::WorkflowError;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, Role, User};

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    department: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = WorkflowError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(r.email)
            .map_err(|e| WorkflowError::Storage(format!("invalid email from database: {}", e)))?;
        Ok(User::from_persistence(
            r.id,
            r.name,
            email,
            r.password_hash,
            r.role,
            r.department,
        ))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, WorkflowError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, department)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.email().as_str())
        .bind(user.password_hash())
        .bind(user.role())
        .bind(user.department())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                WorkflowError::Validation("email already registered".to_string())
            }
            _ => WorkflowError::Storage(format!("failed to create user: {}", e)),
        })?;

        Ok(user.id())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WorkflowError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, role, department FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WorkflowError::Storage(format!("failed to find user by id: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, WorkflowError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, role, department FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WorkflowError::Storage(format!("failed to find user by email: {}", e)))?;

        row.map(User::try_from).transpose()
    }
}
