use color_eyre::Result;
use ulid::Ulid;

use super::models::{Course, CourseCard, ModerationCourse};
use super::Db;

/// Catalog filters. Empty strings mean "no filter".
#[derive(Default)]
pub struct CatalogFilter {
    pub category: String,
    pub price_type: String,
    pub search: String,
    pub page: i64,
}

const CARD_SELECT: &str = r#"
    SELECT
      c.id,
      c.public_id,
      c.title,
      c.category,
      c.price_type,
      c.price_cents,
      c.image_url,
      c.status,
      COUNT(DISTINCT e.id) AS enrollment_count,
      ROUND((AVG(r.score) FILTER (WHERE r.status = 'visible'))::NUMERIC, 1)::FLOAT8 AS rating_avg,
      COUNT(DISTINCT r.id) FILTER (WHERE r.status = 'visible') AS rating_count
    FROM courses c
    LEFT JOIN enrollments e ON e.course_id = c.id
    LEFT JOIN ratings r ON r.course_id = c.id
"#;

impl Db {
    pub async fn create_course(
        &self,
        title: &str,
        description: &str,
        category: &str,
        price_type: &str,
        price_cents: i32,
        image_url: Option<&str>,
        user_id: i32,
    ) -> Result<String> {
        let public_id = Ulid::new().to_string();

        let course_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO courses (public_id, title, description, category, price_type, price_cents, image_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&public_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(price_type)
        .bind(price_cents)
        .bind(image_url)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new course created with id: {course_id} by user_id: {user_id}");
        Ok(public_id)
    }

    /// Active courses for the catalog page, filtered and paginated.
    pub async fn catalog(&self, filter: &CatalogFilter) -> Result<Vec<CourseCard>> {
        let offset = filter.page * crate::names::CATALOG_PAGE_SIZE;
        let sql = format!(
            r#"
            {CARD_SELECT}
            WHERE c.status = 'active'
              AND ($1 = '' OR c.category = $1)
              AND ($2 = '' OR c.price_type = $2)
              AND ($3 = '' OR c.title ILIKE '%' || $3 || '%')
            GROUP BY c.id
            ORDER BY c.created_at DESC
            LIMIT $4 OFFSET $5
            "#
        );

        let cards = sqlx::query_as::<_, CourseCard>(&sql)
            .bind(&filter.category)
            .bind(&filter.price_type)
            .bind(&filter.search)
            .bind(crate::names::CATALOG_PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(cards)
    }

    /// Total number of active courses matching the filter, for pagination.
    pub async fn catalog_count(&self, filter: &CatalogFilter) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM courses
            WHERE status = 'active'
              AND ($1 = '' OR category = $1)
              AND ($2 = '' OR price_type = $2)
              AND ($3 = '' OR title ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(&filter.category)
        .bind(&filter.price_type)
        .bind(&filter.search)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Categories that currently have at least one active course.
    pub async fn catalog_categories(&self) -> Result<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM courses WHERE status = 'active' ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn find_course_by_public_id(&self, public_id: &str) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, public_id, title, description, category, price_type, price_cents,
                   image_url, status, created_by
            FROM courses WHERE public_id = $1
            "#,
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    /// Card row (with aggregates) for one course regardless of status.
    pub async fn course_card(&self, course_id: i32) -> Result<Option<CourseCard>> {
        let sql = format!("{CARD_SELECT} WHERE c.id = $1 GROUP BY c.id");
        let card = sqlx::query_as::<_, CourseCard>(&sql)
            .bind(course_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(card)
    }

    /// Every course with aggregates, newest first, for the studio list.
    pub async fn studio_courses(&self) -> Result<Vec<CourseCard>> {
        let sql = format!("{CARD_SELECT} GROUP BY c.id ORDER BY c.created_at DESC");
        let cards = sqlx::query_as::<_, CourseCard>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(cards)
    }

    /// Update course fields, returning the names of the fields that actually
    /// changed (for the audit trail). None if the course does not exist.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_course(
        &self,
        public_id: &str,
        title: &str,
        description: &str,
        category: &str,
        price_type: &str,
        price_cents: i32,
        image_url: Option<&str>,
    ) -> Result<Option<Vec<String>>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, public_id, title, description, category, price_type, price_cents,
                   image_url, status, created_by
            FROM courses WHERE public_id = $1
            "#,
        )
        .bind(public_id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing = match existing {
            Some(course) => course,
            None => return Ok(None),
        };

        let mut changed = Vec::new();
        if existing.title != title {
            changed.push("title".to_string());
        }
        if existing.description != description {
            changed.push("description".to_string());
        }
        if existing.category != category {
            changed.push("category".to_string());
        }
        if existing.price_type != price_type || existing.price_cents != price_cents {
            changed.push("price".to_string());
        }
        if existing.image_url.as_deref() != image_url {
            changed.push("image".to_string());
        }

        if !changed.is_empty() {
            sqlx::query(
                r#"
                UPDATE courses
                SET title = $1, description = $2, category = $3, price_type = $4,
                    price_cents = $5, image_url = $6
                WHERE public_id = $7
                "#,
            )
            .bind(title)
            .bind(description)
            .bind(category)
            .bind(price_type)
            .bind(price_cents)
            .bind(image_url)
            .bind(public_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("course {public_id} updated, changed fields: {changed:?}");
        Ok(Some(changed))
    }

    /// Change a course's status. Returns (course_id, title) for the audit
    /// trail, or None if the course does not exist.
    pub async fn set_course_status(
        &self,
        public_id: &str,
        status: &str,
    ) -> Result<Option<(i32, String)>> {
        let row: Option<(i32, String)> = sqlx::query_as(
            "UPDATE courses SET status = $1 WHERE public_id = $2 RETURNING id, title",
        )
        .bind(status)
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some((course_id, _)) = &row {
            tracing::info!("course {course_id} status set to {status}");
        }
        Ok(row)
    }

    /// Delete a draft course. Live courses must be deactivated instead, so
    /// enrollments and the audit trail survive authoring mistakes.
    /// Returns (course_id, title) of the deleted row.
    pub async fn delete_draft_course(&self, public_id: &str) -> Result<Option<(i32, String)>> {
        let row: Option<(i32, String)> = sqlx::query_as(
            "DELETE FROM courses WHERE public_id = $1 AND status = 'draft' RETURNING id, title",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some((course_id, _)) = &row {
            tracing::info!("draft course {course_id} deleted");
        }
        Ok(row)
    }

    /// All courses with creator names, for the moderation page.
    pub async fn moderation_courses(&self) -> Result<Vec<ModerationCourse>> {
        let courses = sqlx::query_as::<_, ModerationCourse>(
            r#"
            SELECT
              c.id,
              c.public_id,
              c.title,
              c.category,
              c.status,
              u.display_name AS creator_name,
              COUNT(e.id) AS enrollment_count
            FROM courses c
            JOIN users u ON u.id = c.created_by
            LEFT JOIN enrollments e ON e.course_id = c.id
            GROUP BY c.id, u.display_name
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }
}
