use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::Result;
use ulid::Ulid;

use super::models::{AuthUser, UserAdminRow};
use super::Db;

impl Db {
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<i32> {
        let password_hash = hash_password(password)?;

        let user_id: i32 = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash, display_name, email_verified)
             VALUES ($1, $2, $3, TRUE) RETURNING id",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new user created: id={user_id}, email={email}");
        Ok(user_id)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, email, display_name, role, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        let stored_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        match stored_hash {
            Some(hash) => Ok(verify_password(password, &hash)),
            None => Ok(false),
        }
    }

    pub async fn create_user_session(&self, user_id: i32) -> Result<String> {
        let session = Ulid::new().to_string();

        sqlx::query("INSERT INTO user_sessions (id, user_id) VALUES ($1, $2)")
            .bind(&session)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("new user session created for user_id={user_id}");
        Ok(session)
    }

    pub async fn get_user_by_session(&self, session_id: &str) -> Result<Option<AuthUser>> {
        let user = sqlx::query_as::<_, AuthUser>(
            r#"
            SELECT u.id, u.email, u.display_name, u.role, u.is_active
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1 AND u.is_active
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new user with email_verified = false and a verification token.
    /// Returns (user_id, token).
    pub async fn create_unverified_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<(i32, String)> {
        let password_hash = hash_password(password)?;
        let token = Ulid::new().to_string();
        let mut tx = self.pool.begin().await?;

        let user_id: i32 = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash, display_name, email_verified)
             VALUES ($1, $2, $3, FALSE) RETURNING id",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(display_name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO email_verification_tokens (token, user_id) VALUES ($1, $2)")
            .bind(&token)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("new unverified user created: id={user_id}, email={email}");
        Ok((user_id, token))
    }

    /// Verify a user's email using their verification token.
    /// Returns true if verification succeeded, false if token is invalid/expired.
    pub async fn verify_email_token(&self, token: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE users SET email_verified = TRUE
            WHERE email_verified = FALSE
              AND id = (
                SELECT user_id FROM email_verification_tokens
                WHERE token = $1 AND created_at > NOW() - INTERVAL '24 hours'
              )
            "#,
        )
        .bind(token)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM email_verification_tokens WHERE token = $1")
            .bind(token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(affected > 0)
    }

    /// Check if a user's email is verified.
    pub async fn is_email_verified(&self, email: &str) -> Result<bool> {
        let verified: Option<bool> =
            sqlx::query_scalar("SELECT email_verified FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(verified.unwrap_or(false))
    }

    /// Regenerate the verification token for an unverified user. Returns the new token.
    pub async fn regenerate_verification_token(&self, email: &str) -> Result<Option<String>> {
        let token = Ulid::new().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM email_verification_tokens
             WHERE user_id = (SELECT id FROM users WHERE email = $1)",
        )
        .bind(email)
        .execute(&mut *tx)
        .await?;

        let affected = sqlx::query(
            r#"
            INSERT INTO email_verification_tokens (token, user_id)
            SELECT $1, id FROM users WHERE email = $2 AND email_verified = FALSE
            "#,
        )
        .bind(&token)
        .bind(email)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if affected > 0 {
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    /// Create a password reset token for a verified user. Returns None if email not found or not verified.
    pub async fn create_password_reset_token(&self, email: &str) -> Result<Option<String>> {
        let token = Ulid::new().to_string();

        let affected = sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (token, user_id)
            SELECT $1, id FROM users WHERE email = $2 AND email_verified = TRUE
            "#,
        )
        .bind(&token)
        .bind(email)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected > 0 {
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    /// Validate a password reset token. Returns the user's email if valid and not expired.
    pub async fn validate_password_reset_token(&self, token: &str) -> Result<Option<String>> {
        let email: Option<String> = sqlx::query_scalar(
            r#"
            SELECT u.email
            FROM password_reset_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token = $1 AND t.created_at > NOW() - INTERVAL '1 hour'
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(email)
    }

    /// Reset a user's password using a valid token. Returns true if successful.
    pub async fn reset_password_with_token(&self, token: &str, new_password: &str) -> Result<bool> {
        let password_hash = hash_password(new_password)?;
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE users SET password_hash = $1
            WHERE id = (
                SELECT user_id FROM password_reset_tokens
                WHERE token = $2 AND created_at > NOW() - INTERVAL '1 hour'
            )
            "#,
        )
        .bind(&password_hash)
        .bind(token)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM password_reset_tokens WHERE token = $1")
            .bind(token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(affected > 0)
    }

    /// Change password for an authenticated user. Verifies current password first.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<bool> {
        let stored_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        let stored_hash = match stored_hash {
            Some(hash) => hash,
            None => return Ok(false),
        };

        if !verify_password(current_password, &stored_hash) {
            return Ok(false);
        }

        let new_hash = hash_password(new_password)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// All users with their enrollment counts, for the user management page.
    pub async fn users_with_enrollments(&self) -> Result<Vec<UserAdminRow>> {
        let users = sqlx::query_as::<_, UserAdminRow>(
            r#"
            SELECT
              u.id,
              u.email,
              u.display_name,
              u.role,
              u.is_active,
              to_char(u.created_at, 'YYYY-MM-DD') AS created_date,
              COUNT(e.id) AS enrollment_count
            FROM users u
            LEFT JOIN enrollments e ON e.user_id = u.id
            GROUP BY u.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Returns false if the role is not one of the known roles or the user
    /// does not exist.
    pub async fn set_user_role(&self, user_id: i32, role: &str) -> Result<bool> {
        if !crate::names::ROLES.contains(&role) {
            return Ok(false);
        }

        let affected = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(role)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected > 0 {
            tracing::info!("user {user_id} role changed to {role}");
        }
        Ok(affected > 0)
    }

    /// Flip the active flag. Deactivating also drops the user's sessions.
    /// Returns the new flag, or None if the user does not exist.
    pub async fn toggle_user_active(&self, user_id: i32) -> Result<Option<bool>> {
        let mut tx = self.pool.begin().await?;

        let is_active: Option<bool> = sqlx::query_scalar(
            "UPDATE users SET is_active = NOT is_active WHERE id = $1 RETURNING is_active",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if is_active == Some(false) {
            sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        if let Some(active) = is_active {
            tracing::info!("user {user_id} active flag set to {active}");
        }
        Ok(is_active)
    }
}

/// Run argon2 hashing on a dedicated thread with a large stack to avoid
/// stack overflow in debug builds.
fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024) // 4 MB stack
        .spawn(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = Argon2::default();
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| color_eyre::eyre::eyre!("failed to hash password: {e}"))
        })?
        .join()
        .map_err(|_| color_eyre::eyre::eyre!("hash thread panicked"))?
}

fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024)
        .spawn(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(h) => h,
                Err(_) => return false,
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .map(|h| h.join().unwrap_or(false))
        .unwrap_or(false)
}
