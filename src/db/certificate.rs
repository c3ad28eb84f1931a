use color_eyre::Result;
use ulid::Ulid;

use super::models::{Certificate, CertificateVerification};
use super::Db;

impl Db {
    /// Issue a certificate for a completed course. Returns the certificate
    /// code, the existing code if one was already issued, or None when the
    /// user has not completed every lesson (or the course has none).
    pub async fn issue_certificate(&self, user_id: i32, course_id: i32) -> Result<Option<String>> {
        let (completed, total) = self.course_progress(user_id, course_id).await?;
        if total == 0 || completed < total {
            return Ok(None);
        }

        let existing: Option<String> = sqlx::query_scalar(
            "SELECT certificate_code FROM certificates WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(code) = existing {
            return Ok(Some(code));
        }

        let code = Ulid::new().to_string();
        sqlx::query(
            "INSERT INTO certificates (certificate_code, user_id, course_id) VALUES ($1, $2, $3)",
        )
        .bind(&code)
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("certificate issued to user {user_id} for course {course_id}");
        Ok(Some(code))
    }

    pub async fn certificate_code_for(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> Result<Option<String>> {
        let code = sqlx::query_scalar(
            "SELECT certificate_code FROM certificates WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(code)
    }

    pub async fn certificates_for_user(&self, user_id: i32) -> Result<Vec<Certificate>> {
        let certificates = sqlx::query_as::<_, Certificate>(
            r#"
            SELECT
              cert.id,
              cert.certificate_code,
              c.title AS course_title,
              cert.status,
              to_char(cert.issued_at, 'YYYY-MM-DD') AS issued_date,
              cert.download_count
            FROM certificates cert
            JOIN courses c ON c.id = cert.course_id
            WHERE cert.user_id = $1
            ORDER BY cert.issued_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(certificates)
    }

    /// Owner's printable certificate view. Each open counts as a download.
    pub async fn open_certificate(
        &self,
        code: &str,
        user_id: i32,
    ) -> Result<Option<CertificateVerification>> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            "UPDATE certificates SET download_count = download_count + 1
             WHERE certificate_code = $1 AND user_id = $2",
        )
        .bind(code)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            return Ok(None);
        }

        let certificate = sqlx::query_as::<_, CertificateVerification>(
            r#"
            SELECT
              cert.certificate_code,
              c.title AS course_title,
              u.display_name AS user_name,
              cert.status,
              to_char(cert.issued_at, 'YYYY-MM-DD') AS issued_date
            FROM certificates cert
            JOIN courses c ON c.id = cert.course_id
            JOIN users u ON u.id = cert.user_id
            WHERE cert.certificate_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(certificate)
    }

    /// Public verification lookup, no auth and no download counting.
    pub async fn find_certificate_by_code(
        &self,
        code: &str,
    ) -> Result<Option<CertificateVerification>> {
        let certificate = sqlx::query_as::<_, CertificateVerification>(
            r#"
            SELECT
              cert.certificate_code,
              c.title AS course_title,
              u.display_name AS user_name,
              cert.status,
              to_char(cert.issued_at, 'YYYY-MM-DD') AS issued_date
            FROM certificates cert
            JOIN courses c ON c.id = cert.course_id
            JOIN users u ON u.id = cert.user_id
            WHERE cert.certificate_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(certificate)
    }
}
