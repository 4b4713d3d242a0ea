/// User model and database operations
///
/// A user account moves through a one-way status lifecycle: created
/// `inactive` on registration, transitioned to `active` exactly once when
/// the email verification code checks out. There is no deactivation path.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_status AS ENUM ('inactive', 'active');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_digest VARCHAR(64) NOT NULL,
///     status user_status NOT NULL DEFAULT 'inactive',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::user::{CreateUser, User};
/// use tasknest_shared::auth::password::hash_password;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_digest: hash_password("Secret1!"),
///     },
/// )
/// .await?;
///
/// assert_eq!(user.status, tasknest_shared::models::user::UserStatus::Inactive);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Account verification status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Registered but email not yet verified
    Inactive,

    /// Email verified; account can log in
    Active,
}

impl UserStatus {
    /// Converts status to string for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Inactive => "inactive",
            UserStatus::Active => "active",
        }
    }

    /// Whether the account may log in
    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

/// User account record
///
/// `password_digest` is the deterministic SHA-256 digest of the password;
/// plaintext is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user id (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// SHA-256 digest of the password (64 hex chars)
    pub password_digest: String,

    /// Verification status
    pub status: UserStatus,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// The user fields exposed to clients
///
/// Login and verification responses carry this shape; the password digest
/// stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,

    /// Already-hashed password digest, not plaintext
    pub password_digest: String,
}

impl User {
    /// The client-visible projection of this account
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// Creates a new user in `inactive` status
    ///
    /// # Errors
    ///
    /// A unique-constraint violation on `email` is returned as a database
    /// error; callers surface it as a conflict. Two racing registrations for
    /// the same email resolve here rather than in application code.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_digest)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_digest, status, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_digest)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_digest, status, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_digest, status, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user matching email AND password digest in one query
    ///
    /// Login uses this constant-shape lookup so an unknown email and a wrong
    /// password are indistinguishable to the caller; both come back `None`.
    pub async fn find_by_credentials(
        pool: &PgPool,
        email: &str,
        password_digest: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_digest, status, created_at, updated_at
            FROM users
            WHERE email = $1 AND password_digest = $2
            "#,
        )
        .bind(email)
        .bind(password_digest)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Transitions a user to `active`
    ///
    /// Setting an already-active user to active is a no-op by design;
    /// re-verification succeeds without changing anything.
    ///
    /// # Returns
    ///
    /// The updated user, or `None` if the id does not exist.
    pub async fn activate(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = 'active', updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_digest, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Overwrites the stored password digest
    ///
    /// # Returns
    ///
    /// `true` if a row was updated, `false` if the user does not exist.
    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_digest: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_digest = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_digest)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(UserStatus::Inactive.as_str(), "inactive");
        assert_eq!(UserStatus::Active.as_str(), "active");
    }

    #[test]
    fn test_status_is_active() {
        assert!(UserStatus::Active.is_active());
        assert!(!UserStatus::Inactive.is_active());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserStatus::Inactive).unwrap(),
            "\"inactive\""
        );
        let parsed: UserStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(parsed, UserStatus::Active);
    }

    #[test]
    fn test_public_projection_hides_digest() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_digest: "d".repeat(64),
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(user.public()).unwrap();
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("password_digest").is_none());
        assert!(json.get("status").is_none());
    }
}
