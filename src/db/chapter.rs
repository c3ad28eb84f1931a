use color_eyre::Result;

use super::models::{Chapter, ChapterProgress, Lesson, LessonListItem, LessonResource};
use super::Db;

impl Db {
    pub async fn add_chapter(&self, course_id: i32, title: &str, content: &str) -> Result<i32> {
        let chapter_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO chapters (course_id, title, content, position)
            VALUES ($1, $2, $3,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM chapters WHERE course_id = $1))
            RETURNING id
            "#,
        )
        .bind(course_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new chapter {chapter_id} added to course {course_id}");
        Ok(chapter_id)
    }

    pub async fn update_chapter(&self, chapter_id: i32, title: &str, content: &str) -> Result<bool> {
        let affected = sqlx::query("UPDATE chapters SET title = $1, content = $2 WHERE id = $3")
            .bind(title)
            .bind(content)
            .bind(chapter_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    pub async fn delete_chapter(&self, chapter_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM chapters WHERE id = $1")
            .bind(chapter_id)
            .execute(&self.pool)
            .await?;
        tracing::info!("chapter {chapter_id} deleted");
        Ok(())
    }

    /// Swap a chapter with its neighbor above or below. Returns false when
    /// the chapter is already at the edge.
    pub async fn move_chapter(&self, chapter_id: i32, up: bool) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(i32, i32)> =
            sqlx::query_as("SELECT course_id, position FROM chapters WHERE id = $1")
                .bind(chapter_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (course_id, position) = match current {
            Some(row) => row,
            None => return Ok(false),
        };

        let neighbor: Option<(i32, i32)> = if up {
            sqlx::query_as(
                "SELECT id, position FROM chapters
                 WHERE course_id = $1 AND position < $2
                 ORDER BY position DESC LIMIT 1",
            )
        } else {
            sqlx::query_as(
                "SELECT id, position FROM chapters
                 WHERE course_id = $1 AND position > $2
                 ORDER BY position ASC LIMIT 1",
            )
        }
        .bind(course_id)
        .bind(position)
        .fetch_optional(&mut *tx)
        .await?;

        let (neighbor_id, neighbor_position) = match neighbor {
            Some(row) => row,
            None => return Ok(false),
        };

        sqlx::query("UPDATE chapters SET position = $1 WHERE id = $2")
            .bind(neighbor_position)
            .bind(chapter_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE chapters SET position = $1 WHERE id = $2")
            .bind(position)
            .bind(neighbor_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn chapters(&self, course_id: i32) -> Result<Vec<Chapter>> {
        let chapters = sqlx::query_as::<_, Chapter>(
            "SELECT id, course_id, title, content, position
             FROM chapters WHERE course_id = $1 ORDER BY position",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(chapters)
    }

    pub async fn find_chapter(&self, chapter_id: i32) -> Result<Option<Chapter>> {
        let chapter = sqlx::query_as::<_, Chapter>(
            "SELECT id, course_id, title, content, position FROM chapters WHERE id = $1",
        )
        .bind(chapter_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(chapter)
    }

    pub async fn chapter_belongs_to_course(&self, chapter_id: i32, course_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM chapters WHERE id = $1 AND course_id = $2)",
        )
        .bind(chapter_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Chapters of a course with the viewing user's progress. The `locked`
    /// flag is filled here: each chapter is locked until every lesson of
    /// every earlier chapter is completed.
    pub async fn chapters_with_progress(
        &self,
        course_id: i32,
        user_id: i32,
    ) -> Result<Vec<ChapterProgress>> {
        let mut chapters = sqlx::query_as::<_, ChapterProgress>(
            r#"
            SELECT
              ch.id,
              ch.title,
              ch.position,
              COUNT(DISTINCT l.id) AS lesson_count,
              COUNT(DISTINCT lp.lesson_id) AS completed_lessons,
              COUNT(DISTINCT m.id) AS mcq_count
            FROM chapters ch
            LEFT JOIN lessons l ON l.chapter_id = ch.id
            LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $2
            LEFT JOIN mcqs m ON m.chapter_id = ch.id
            WHERE ch.course_id = $1
            GROUP BY ch.id
            ORDER BY ch.position
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut all_previous_done = true;
        for chapter in &mut chapters {
            chapter.locked = !all_previous_done;
            if chapter.completed_lessons < chapter.lesson_count {
                all_previous_done = false;
            }
        }

        Ok(chapters)
    }

    pub async fn add_lesson(
        &self,
        chapter_id: i32,
        title: &str,
        content: &str,
        duration_minutes: i32,
        resources: &[(String, String)],
    ) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let lesson_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO lessons (chapter_id, title, content, position, duration_minutes)
            VALUES ($1, $2, $3,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM lessons WHERE chapter_id = $1),
                    $4)
            RETURNING id
            "#,
        )
        .bind(chapter_id)
        .bind(title)
        .bind(content)
        .bind(duration_minutes)
        .fetch_one(&mut *tx)
        .await?;

        if !resources.is_empty() {
            let kinds: Vec<String> = resources.iter().map(|(kind, _)| kind.clone()).collect();
            let urls: Vec<String> = resources.iter().map(|(_, url)| url.clone()).collect();
            let lesson_ids: Vec<i32> = vec![lesson_id; resources.len()];

            sqlx::query(
                r#"
                INSERT INTO lesson_resources (lesson_id, kind, url)
                SELECT * FROM UNNEST($1::INT4[], $2::TEXT[], $3::TEXT[])
                "#,
            )
            .bind(&lesson_ids)
            .bind(&kinds)
            .bind(&urls)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("new lesson {lesson_id} added to chapter {chapter_id}");
        Ok(lesson_id)
    }

    /// Update a lesson and replace its resource list.
    pub async fn update_lesson(
        &self,
        lesson_id: i32,
        title: &str,
        content: &str,
        duration_minutes: i32,
        resources: &[(String, String)],
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            "UPDATE lessons SET title = $1, content = $2, duration_minutes = $3 WHERE id = $4",
        )
        .bind(title)
        .bind(content)
        .bind(duration_minutes)
        .bind(lesson_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM lesson_resources WHERE lesson_id = $1")
            .bind(lesson_id)
            .execute(&mut *tx)
            .await?;

        if !resources.is_empty() {
            let kinds: Vec<String> = resources.iter().map(|(kind, _)| kind.clone()).collect();
            let urls: Vec<String> = resources.iter().map(|(_, url)| url.clone()).collect();
            let lesson_ids: Vec<i32> = vec![lesson_id; resources.len()];

            sqlx::query(
                r#"
                INSERT INTO lesson_resources (lesson_id, kind, url)
                SELECT * FROM UNNEST($1::INT4[], $2::TEXT[], $3::TEXT[])
                "#,
            )
            .bind(&lesson_ids)
            .bind(&kinds)
            .bind(&urls)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    pub async fn delete_lesson(&self, lesson_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(&self.pool)
            .await?;
        tracing::info!("lesson {lesson_id} deleted");
        Ok(())
    }

    pub async fn lessons(&self, chapter_id: i32) -> Result<Vec<Lesson>> {
        let lessons = sqlx::query_as::<_, Lesson>(
            "SELECT id, chapter_id, title, content, position, duration_minutes
             FROM lessons WHERE chapter_id = $1 ORDER BY position",
        )
        .bind(chapter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lessons)
    }

    /// Lessons of a chapter with a per-user completion flag.
    pub async fn lessons_with_completion(
        &self,
        chapter_id: i32,
        user_id: i32,
    ) -> Result<Vec<LessonListItem>> {
        let lessons = sqlx::query_as::<_, LessonListItem>(
            r#"
            SELECT
              l.id,
              l.title,
              l.position,
              l.duration_minutes,
              EXISTS(
                SELECT 1 FROM lesson_progress lp
                WHERE lp.lesson_id = l.id AND lp.user_id = $2
              ) AS completed
            FROM lessons l
            WHERE l.chapter_id = $1
            ORDER BY l.position
            "#,
        )
        .bind(chapter_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lessons)
    }

    pub async fn find_lesson(&self, lesson_id: i32) -> Result<Option<Lesson>> {
        let lesson = sqlx::query_as::<_, Lesson>(
            "SELECT id, chapter_id, title, content, position, duration_minutes
             FROM lessons WHERE id = $1",
        )
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(lesson)
    }

    pub async fn lesson_resources(&self, lesson_id: i32) -> Result<Vec<LessonResource>> {
        let resources = sqlx::query_as::<_, LessonResource>(
            "SELECT id, kind, url FROM lesson_resources WHERE lesson_id = $1 ORDER BY id",
        )
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(resources)
    }

    pub async fn lesson_belongs_to_course(&self, lesson_id: i32, course_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
              SELECT 1 FROM lessons l
              JOIN chapters ch ON ch.id = l.chapter_id
              WHERE l.id = $1 AND ch.course_id = $2
            )
            "#,
        )
        .bind(lesson_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
