use color_eyre::eyre::bail;
use color_eyre::Result;

use super::models::WishlistItem;
use super::Db;

const ITEM_SELECT: &str = r#"
    SELECT
      wi.id,
      wi.course_id,
      wi.position,
      to_char(wi.added_at, 'YYYY-MM-DD') AS added_date,
      c.public_id AS course_public_id,
      c.title AS course_title,
      c.category AS course_category,
      c.status AS course_status,
      c.price_type,
      c.price_cents,
      c.image_url
    FROM wishlist_items wi
    JOIN courses c ON c.id = wi.course_id
"#;

impl Db {
    pub async fn wishlist_items(&self, user_id: i32) -> Result<Vec<WishlistItem>> {
        let items = sqlx::query_as::<_, WishlistItem>(&format!(
            "{ITEM_SELECT} WHERE wi.user_id = $1 ORDER BY wi.position"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Append a course to the end of the user's wishlist and return the
    /// stored row.
    pub async fn add_wishlist_item(&self, user_id: i32, course_id: i32) -> Result<WishlistItem> {
        let id: Option<i32> = sqlx::query_scalar(
            r#"
            INSERT INTO wishlist_items (user_id, course_id, position)
            VALUES (
              $1,
              $2,
              (SELECT COALESCE(MAX(position), 0) + 1 FROM wishlist_items WHERE user_id = $1)
            )
            ON CONFLICT (user_id, course_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(id) = id else {
            bail!("course {course_id} is already in the wishlist of user {user_id}");
        };

        let item = sqlx::query_as::<_, WishlistItem>(&format!("{ITEM_SELECT} WHERE wi.id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("user {user_id} wishlisted course {course_id}");
        Ok(item)
    }

    pub async fn remove_wishlist_item(&self, user_id: i32, course_id: i32) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM wishlist_items WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!("user {user_id} removed course {course_id} from wishlist");
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn wishlist_count(&self, user_id: i32) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM wishlist_items WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn wishlist_contains(&self, user_id: i32, course_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM wishlist_items WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn clear_wishlist(&self, user_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            "user {user_id} cleared wishlist ({} items)",
            result.rows_affected()
        );
        Ok(result.rows_affected())
    }

    /// Move a wishlist entry to a new 1-based position, shifting its
    /// neighbors. Out-of-range targets are clamped.
    pub async fn move_wishlist_item(
        &self,
        user_id: i32,
        course_id: i32,
        new_position: i32,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let current: Option<i32> = sqlx::query_scalar(
            "SELECT position FROM wishlist_items WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(false);
        };

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wishlist_items WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        let target = new_position.clamp(1, count as i32);

        if target == current {
            return Ok(true);
        }

        if target < current {
            sqlx::query(
                r#"
                UPDATE wishlist_items
                SET position = position + 1
                WHERE user_id = $1 AND position >= $2 AND position < $3
                "#,
            )
            .bind(user_id)
            .bind(target)
            .bind(current)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                r#"
                UPDATE wishlist_items
                SET position = position - 1
                WHERE user_id = $1 AND position > $2 AND position <= $3
                "#,
            )
            .bind(user_id)
            .bind(current)
            .bind(target)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE wishlist_items SET position = $3 WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(target)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!("user {user_id} moved course {course_id} to position {target}");
        Ok(true)
    }
}
