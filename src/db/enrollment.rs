use color_eyre::Result;

use super::models::EnrolledCourse;
use super::Db;

impl Db {
    /// Enroll a user in a course. Returns false if already enrolled (the
    /// unique constraint makes duplicates a no-op).
    pub async fn enroll(&self, user_id: i32, course_id: i32, batch: Option<&str>) -> Result<bool> {
        let affected = sqlx::query(
            r#"
            INSERT INTO enrollments (user_id, course_id, batch)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(batch)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected > 0 {
            tracing::info!("user {user_id} enrolled in course {course_id}");
        }
        Ok(affected > 0)
    }

    pub async fn is_enrolled(&self, user_id: i32, course_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn enrollment_count(&self, course_id: i32) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// The user's enrollments with per-course progress summaries. A chapter
    /// counts as completed when none of its lessons is missing a progress row.
    pub async fn enrolled_courses(&self, user_id: i32) -> Result<Vec<EnrolledCourse>> {
        let courses = sqlx::query_as::<_, EnrolledCourse>(
            r#"
            SELECT
              c.id AS course_id,
              c.public_id,
              c.title,
              c.category,
              c.image_url,
              e.batch,
              to_char(e.enrolled_at, 'YYYY-MM-DD') AS enrolled_date,
              (SELECT COUNT(*) FROM chapters ch WHERE ch.course_id = c.id) AS total_chapters,
              (SELECT COUNT(*) FROM chapters ch
                WHERE ch.course_id = c.id
                  AND NOT EXISTS (
                    SELECT 1 FROM lessons l
                    WHERE l.chapter_id = ch.id
                      AND NOT EXISTS (
                        SELECT 1 FROM lesson_progress lp
                        WHERE lp.lesson_id = l.id AND lp.user_id = e.user_id
                      )
                  )
              ) AS completed_chapters,
              (SELECT COUNT(*) FROM lessons l
                JOIN chapters ch ON ch.id = l.chapter_id
                WHERE ch.course_id = c.id) AS total_lessons,
              (SELECT COUNT(*) FROM lesson_progress lp
                JOIN lessons l ON l.id = lp.lesson_id
                JOIN chapters ch ON ch.id = l.chapter_id
                WHERE ch.course_id = c.id AND lp.user_id = e.user_id) AS completed_lessons
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id
            WHERE e.user_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    /// Record lesson completion. Idempotent.
    pub async fn complete_lesson(&self, user_id: i32, lesson_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO lesson_progress (user_id, lesson_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, lesson_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("user {user_id} completed lesson {lesson_id}");
        Ok(())
    }

    /// (completed, total) lesson counts for one course and user.
    pub async fn course_progress(&self, user_id: i32, course_id: i32) -> Result<(i64, i64)> {
        let progress: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
              COUNT(lp.lesson_id) AS completed,
              COUNT(l.id) AS total
            FROM lessons l
            JOIN chapters ch ON ch.id = l.chapter_id
            LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $1
            WHERE ch.course_id = $2
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(progress)
    }
}
