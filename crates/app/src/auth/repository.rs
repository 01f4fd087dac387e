//! Credential store.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use smallvec::SmallVec;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::auth::{
    Role, User, UserUuid,
    models::{NewUser, StoredCredentials},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const GRANT_ROLE_SQL: &str = include_str!("sql/grant_role.sql");
const REVOKE_ROLE_SQL: &str = include_str!("sql/revoke_role.sql");
const SET_USER_ACTIVE_SQL: &str = include_str!("sql/set_user_active.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(&self, user: &NewUser) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, sqlx::Error> {
        query_as::<Postgres, StoredCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_user(&self, user: UserUuid) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn grant_role(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(GRANT_ROLE_SQL)
            .bind(email)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn revoke_role(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(REVOKE_ROLE_SQL)
            .bind(email)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn set_active(
        &self,
        email: &str,
        is_active: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(SET_USER_ACTIVE_SQL)
            .bind(email)
            .bind(is_active)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let roles = row
            .try_get::<Vec<String>, _>("roles")?
            .iter()
            .map(|role| role.parse::<Role>())
            .collect::<Result<SmallVec<[Role; 2]>, _>>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "roles".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            is_active: row.try_get("is_active")?,
            roles,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
