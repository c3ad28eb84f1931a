use color_eyre::Result;

use super::models::{ModerationRating, Rating};
use super::Db;

impl Db {
    /// Create or update the user's rating for a course. A moderator's
    /// visibility decision survives edits.
    pub async fn rate_course(
        &self,
        user_id: i32,
        course_id: i32,
        score: i32,
        review: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (user_id, course_id, score, review)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, course_id)
            DO UPDATE SET score = EXCLUDED.score, review = EXCLUDED.review
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(score)
        .bind(review)
        .execute(&self.pool)
        .await?;

        tracing::info!("user {user_id} rated course {course_id}: {score}");
        Ok(())
    }

    pub async fn user_rating(&self, user_id: i32, course_id: i32) -> Result<Option<(i32, String)>> {
        let rating: Option<(i32, String)> = sqlx::query_as(
            "SELECT score, review FROM ratings WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rating)
    }

    pub async fn visible_ratings(&self, course_id: i32) -> Result<Vec<Rating>> {
        let ratings = sqlx::query_as::<_, Rating>(
            r#"
            SELECT
              r.id,
              u.display_name AS user_name,
              r.score,
              r.review,
              r.status,
              to_char(r.created_at, 'YYYY-MM-DD') AS created_date
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            WHERE r.course_id = $1 AND r.status = 'visible'
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ratings)
    }

    /// (average, count) over visible ratings.
    pub async fn rating_summary(&self, course_id: i32) -> Result<(Option<f64>, i64)> {
        let summary: (Option<f64>, i64) = sqlx::query_as(
            r#"
            SELECT
              ROUND(AVG(score)::NUMERIC, 1)::FLOAT8 AS rating_avg,
              COUNT(*) AS rating_count
            FROM ratings
            WHERE course_id = $1 AND status = 'visible'
            "#,
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    pub async fn ratings_for_moderation(&self) -> Result<Vec<ModerationRating>> {
        let ratings = sqlx::query_as::<_, ModerationRating>(
            r#"
            SELECT
              r.id,
              c.title AS course_title,
              u.display_name AS user_name,
              r.score,
              r.review,
              r.status
            FROM ratings r
            JOIN courses c ON c.id = r.course_id
            JOIN users u ON u.id = r.user_id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ratings)
    }

    /// Flip a rating between visible and hidden. Returns the new status.
    pub async fn toggle_rating_status(&self, rating_id: i32) -> Result<Option<String>> {
        let status: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE ratings
            SET status = CASE WHEN status = 'visible' THEN 'hidden' ELSE 'visible' END
            WHERE id = $1
            RETURNING status
            "#,
        )
        .bind(rating_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(status) = &status {
            tracing::info!("rating {rating_id} set to {status}");
        }
        Ok(status)
    }
}
