use color_eyre::Result;

use super::models::{MonthlyEnrollment, PlatformStats};
use super::Db;

impl Db {
    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            r#"
            SELECT
              (SELECT COUNT(*) FROM users) AS total_users,
              (SELECT COUNT(*) FROM courses) AS total_courses,
              (SELECT COUNT(*) FROM courses WHERE status = 'active') AS active_courses,
              (SELECT COUNT(*) FROM enrollments) AS total_enrollments,
              (SELECT COUNT(*) FROM certificates) AS certificates_issued,
              (SELECT COUNT(*) FROM email_campaigns WHERE status = 'sent') AS campaigns_sent
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    /// Enrollment counts per month over the last year, oldest first.
    pub async fn monthly_enrollments(&self) -> Result<Vec<MonthlyEnrollment>> {
        let months = sqlx::query_as::<_, MonthlyEnrollment>(
            r#"
            SELECT
              to_char(enrolled_at, 'YYYY-MM') AS month_label,
              COUNT(*) AS count
            FROM enrollments
            WHERE enrolled_at > CURRENT_TIMESTAMP - INTERVAL '12 months'
            GROUP BY month_label
            ORDER BY month_label
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(months)
    }
}
