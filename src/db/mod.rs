// Database module - provides data access layer

use color_eyre::Result;

// Re-export models for convenience
pub mod models;
pub use models::*;

// Internal modules
mod audit;
mod campaign;
mod certificate;
mod chapter;
mod course;
mod enrollment;
mod migrations;
mod question;
mod rating;
mod stats;
mod user;
mod wishlist;

pub use course::CatalogFilter;
pub(crate) use question::has_duplicate_options;

// Main database handle
#[derive(Clone)]
pub struct Db {
    pool: sqlx::PgPool,
}

impl Db {
    pub async fn new(url: &str) -> Result<Self> {
        let pool = sqlx::PgPool::connect(url).await?;

        // Verify connection
        let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
        assert_eq!(one, 1);

        migrations::run(&pool).await?;

        tracing::info!("database connection has been verified");

        Ok(Self { pool })
    }
}
