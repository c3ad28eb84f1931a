use color_eyre::Result;

use super::models::Campaign;
use super::Db;

const CAMPAIGN_SELECT: &str = r#"
    SELECT
      id,
      subject,
      body_html,
      audience,
      status,
      sent_count,
      failed_count,
      to_char(created_at, 'YYYY-MM-DD') AS created_date,
      to_char(sent_at, 'YYYY-MM-DD HH24:MI') AS sent_date
    FROM email_campaigns
"#;

impl Db {
    pub async fn create_campaign(
        &self,
        subject: &str,
        body_html: &str,
        audience: &str,
        created_by: i32,
    ) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO email_campaigns (subject, body_html, audience, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(subject)
        .bind(body_html)
        .bind(audience)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("campaign {id} created by user {created_by}");
        Ok(id)
    }

    pub async fn campaigns(&self) -> Result<Vec<Campaign>> {
        let campaigns =
            sqlx::query_as::<_, Campaign>(&format!("{CAMPAIGN_SELECT} ORDER BY created_at DESC"))
                .fetch_all(&self.pool)
                .await?;
        Ok(campaigns)
    }

    pub async fn find_campaign(&self, campaign_id: i32) -> Result<Option<Campaign>> {
        let campaign =
            sqlx::query_as::<_, Campaign>(&format!("{CAMPAIGN_SELECT} WHERE id = $1"))
                .bind(campaign_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(campaign)
    }

    /// Atomically take a draft campaign into the sending state. Returns
    /// `None` when the campaign is missing or already past draft.
    pub async fn claim_campaign_for_sending(&self, campaign_id: i32) -> Result<Option<Campaign>> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE email_campaigns
            SET status = 'sending'
            WHERE id = $1 AND status = 'draft'
            RETURNING
              id,
              subject,
              body_html,
              audience,
              status,
              sent_count,
              failed_count,
              to_char(created_at, 'YYYY-MM-DD') AS created_date,
              to_char(sent_at, 'YYYY-MM-DD HH24:MI') AS sent_date
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn record_campaign_recipient(
        &self,
        campaign_id: i32,
        email: &str,
        status: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO campaign_recipients (campaign_id, email, status) VALUES ($1, $2, $3)",
        )
        .bind(campaign_id)
        .bind(email)
        .bind(status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn finish_campaign(
        &self,
        campaign_id: i32,
        sent_count: i32,
        failed_count: i32,
        status: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE email_campaigns
            SET status = $2, sent_count = $3, failed_count = $4, sent_at = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(campaign_id)
        .bind(status)
        .bind(sent_count)
        .bind(failed_count)
        .execute(&self.pool)
        .await?;

        tracing::info!("campaign {campaign_id} finished: {sent_count} sent, {failed_count} failed");
        Ok(())
    }

    pub async fn delete_draft_campaign(&self, campaign_id: i32) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM email_campaigns WHERE id = $1 AND status = 'draft'")
                .bind(campaign_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() > 0 {
            tracing::info!("draft campaign {campaign_id} deleted");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Emails of every active, verified user.
    pub async fn all_recipient_emails(&self) -> Result<Vec<String>> {
        let emails: Vec<String> = sqlx::query_scalar(
            "SELECT email FROM users WHERE is_active AND email_verified ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(emails)
    }

    /// Emails of active users enrolled in the given course.
    pub async fn enrolled_recipient_emails(&self, course_public_id: &str) -> Result<Vec<String>> {
        let emails: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT u.email
            FROM enrollments e
            JOIN users u ON u.id = e.user_id
            JOIN courses c ON c.id = e.course_id
            WHERE c.public_id = $1 AND u.is_active AND u.email_verified
            ORDER BY u.email
            "#,
        )
        .bind(course_public_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(emails)
    }
}
