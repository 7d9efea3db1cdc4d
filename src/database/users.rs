use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Role, User};
use crate::database::repository::UserRepository;

const SELECT_ROLE_BY_NAME: &str = "SELECT id, name FROM roles WHERE name = $1";

const INSERT_USER: &str = "INSERT INTO users (login, password) VALUES ($1, $2) RETURNING id";

const INSERT_USER_ROLE: &str = "INSERT INTO users_roles (user_id, role_id) VALUES ($1, $2)";

const SELECT_USER_BY_CREDENTIALS: &str =
    "SELECT id, login, password FROM users WHERE login = $1 AND password = $2";

const SELECT_ROLES_FOR_USER: &str = r#"
SELECT r.id, r.name
FROM roles r
    JOIN users_roles ur ON ur.role_id = r.id
WHERE ur.user_id = $1
ORDER BY r.id"#;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &User, role: &str) -> Result<i64, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let role = sqlx::query_as::<_, Role>(SELECT_ROLE_BY_NAME)
            .bind(role)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("role '{}'", role)))?;

        let (user_id,): (i64,) = sqlx::query_as(INSERT_USER)
            .bind(&user.login)
            .bind(&user.password)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(INSERT_USER_ROLE)
            .bind(user_id)
            .bind(role.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user_id)
    }

    async fn find_by_credentials(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(SELECT_USER_BY_CREDENTIALS)
            .bind(login)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn roles_for_user(&self, user_id: i64) -> Result<Vec<Role>, DatabaseError> {
        let roles = sqlx::query_as::<_, Role>(SELECT_ROLES_FOR_USER)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }
}
