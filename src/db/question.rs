use color_eyre::{eyre::eyre, Result};

use super::models::{CodingQuestion, CodingQuestionSummary, Mcq};
use super::Db;
use crate::models::McqImport;
use crate::names;

impl Db {
    pub async fn add_mcq(
        &self,
        course_id: i32,
        chapter_id: i32,
        question: &str,
        options: &[String],
        correct_index: i32,
    ) -> Result<i32> {
        let mcq_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO mcqs (course_id, chapter_id, question, options, correct_index)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(course_id)
        .bind(chapter_id)
        .bind(question)
        .bind(options)
        .bind(correct_index)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new mcq {mcq_id} added to chapter {chapter_id}");
        Ok(mcq_id)
    }

    pub async fn update_mcq(
        &self,
        mcq_id: i32,
        question: &str,
        options: &[String],
        correct_index: i32,
    ) -> Result<bool> {
        let affected = sqlx::query(
            "UPDATE mcqs SET question = $1, options = $2, correct_index = $3 WHERE id = $4",
        )
        .bind(question)
        .bind(options)
        .bind(correct_index)
        .bind(mcq_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(affected > 0)
    }

    pub async fn delete_mcq(&self, mcq_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM mcqs WHERE id = $1")
            .bind(mcq_id)
            .execute(&self.pool)
            .await?;
        tracing::info!("mcq {mcq_id} deleted");
        Ok(())
    }

    pub async fn find_mcq(&self, mcq_id: i32) -> Result<Option<Mcq>> {
        let mcq = sqlx::query_as::<_, Mcq>(
            "SELECT id, course_id, chapter_id, question, options, correct_index
             FROM mcqs WHERE id = $1",
        )
        .bind(mcq_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(mcq)
    }

    pub async fn mcqs_for_chapter(&self, chapter_id: i32) -> Result<Vec<Mcq>> {
        let mcqs = sqlx::query_as::<_, Mcq>(
            "SELECT id, course_id, chapter_id, question, options, correct_index
             FROM mcqs WHERE chapter_id = $1 ORDER BY id",
        )
        .bind(chapter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(mcqs)
    }

    /// Bulk-import MCQs from an uploaded file, all-or-nothing. Every item is
    /// validated before anything is written. Returns the number inserted.
    pub async fn import_mcqs(&self, course_id: i32, items: &[McqImport]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        let chapter_ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM chapters WHERE course_id = $1")
                .bind(course_id)
                .fetch_all(&mut *tx)
                .await?;

        for (idx, item) in items.iter().enumerate() {
            if !chapter_ids.contains(&item.chapter_id) {
                return Err(eyre!(
                    "item {idx}: chapter {} does not belong to this course",
                    item.chapter_id
                ));
            }
            if item.options.len() != names::MCQ_OPTION_COUNT {
                return Err(eyre!(
                    "item {idx}: expected {} options",
                    names::MCQ_OPTION_COUNT
                ));
            }
            if has_duplicate_options(&item.options) {
                return Err(eyre!("item {idx}: options must be distinct"));
            }
            if !(0..names::MCQ_OPTION_COUNT as i32).contains(&item.correct_index) {
                return Err(eyre!("item {idx}: correct index out of range"));
            }

            sqlx::query(
                r#"
                INSERT INTO mcqs (course_id, chapter_id, question, options, correct_index)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(course_id)
            .bind(item.chapter_id)
            .bind(&item.question)
            .bind(&item.options)
            .bind(item.correct_index)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("imported {} mcqs into course {course_id}", items.len());
        Ok(items.len())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_coding_question(
        &self,
        course_id: i32,
        title: &str,
        description: &str,
        difficulty: &str,
        test_cases: &serde_json::Value,
        starter_code: &serde_json::Value,
        allowed_languages: &[String],
        time_limit_ms: i32,
        memory_limit_mb: i32,
    ) -> Result<i32> {
        let question_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO coding_questions
              (course_id, title, description, difficulty, test_cases, starter_code,
               allowed_languages, time_limit_ms, memory_limit_mb)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(course_id)
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(test_cases)
        .bind(starter_code)
        .bind(allowed_languages)
        .bind(time_limit_ms)
        .bind(memory_limit_mb)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new coding question {question_id} added to course {course_id}");
        Ok(question_id)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_coding_question(
        &self,
        question_id: i32,
        title: &str,
        description: &str,
        difficulty: &str,
        test_cases: &serde_json::Value,
        starter_code: &serde_json::Value,
        allowed_languages: &[String],
        time_limit_ms: i32,
        memory_limit_mb: i32,
    ) -> Result<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE coding_questions
            SET title = $1, description = $2, difficulty = $3, test_cases = $4,
                starter_code = $5, allowed_languages = $6, time_limit_ms = $7,
                memory_limit_mb = $8
            WHERE id = $9
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(test_cases)
        .bind(starter_code)
        .bind(allowed_languages)
        .bind(time_limit_ms)
        .bind(memory_limit_mb)
        .bind(question_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(affected > 0)
    }

    pub async fn delete_coding_question(&self, question_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM coding_questions WHERE id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;
        tracing::info!("coding question {question_id} deleted");
        Ok(())
    }

    pub async fn find_coding_question(&self, question_id: i32) -> Result<Option<CodingQuestion>> {
        let question = sqlx::query_as::<_, CodingQuestion>(
            r#"
            SELECT id, course_id, title, description, difficulty, test_cases, starter_code,
                   allowed_languages, time_limit_ms, memory_limit_mb
            FROM coding_questions WHERE id = $1
            "#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    pub async fn coding_questions(&self, course_id: i32) -> Result<Vec<CodingQuestionSummary>> {
        let questions = sqlx::query_as::<_, CodingQuestionSummary>(
            "SELECT id, title, difficulty FROM coding_questions WHERE course_id = $1 ORDER BY id",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }
}

pub(crate) fn has_duplicate_options(options: &[String]) -> bool {
    for (i, a) in options.iter().enumerate() {
        for b in options.iter().skip(i + 1) {
            if a.trim() == b.trim() {
                return true;
            }
        }
    }
    false
}
