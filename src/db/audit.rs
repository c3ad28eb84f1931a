use color_eyre::Result;

use super::models::AuditLogRow;
use super::Db;
use crate::names;

impl Db {
    /// Append an audit entry for a course mutation. The course title and
    /// actor name are denormalized so entries outlive deletions.
    pub async fn record_course_action(
        &self,
        course_id: Option<i32>,
        course_title: &str,
        action: &str,
        user_id: i32,
        user_name: &str,
        changed_fields: &[String],
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (course_id, course_title, action, user_id, user_name, changed_fields)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(course_id)
        .bind(course_title)
        .bind(action)
        .bind(user_id)
        .bind(user_name)
        .bind(changed_fields)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// One page of audit entries, newest first. An empty `action` matches
    /// everything.
    pub async fn audit_page(&self, action: &str, page: i64) -> Result<Vec<AuditLogRow>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT
              id,
              course_id,
              course_title,
              action,
              user_name,
              changed_fields,
              to_char(created_at, 'YYYY-MM-DD HH24:MI') AS created_date
            FROM audit_logs
            WHERE ($1 = '' OR action = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(action)
        .bind(names::AUDIT_PAGE_SIZE)
        .bind(page * names::AUDIT_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn audit_count(&self, action: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs WHERE ($1 = '' OR action = $1)")
                .bind(action)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn audit_actions(&self) -> Result<Vec<String>> {
        let actions: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT action FROM audit_logs ORDER BY action")
                .fetch_all(&self.pool)
                .await?;
        Ok(actions)
    }
}
