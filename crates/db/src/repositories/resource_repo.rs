//! Repository for the resource catalog (`tools` and `articles` tables).

use ledgergate_core::resource::ResourceRef;
use sqlx::PgPool;

use crate::models::resource::{CatalogEntry, ResourceSummary};

/// Column list for catalog queries (both tables share the shape).
const COLUMNS: &str = "id, title, slug, file_path, published, created_at";

/// Single lookup interface over both catalog tables, keyed by
/// [`ResourceRef`]. The table name comes from the reference's kind, never
/// from user input.
pub struct ResourceRepo;

impl ResourceRepo {
    fn table_for(resource: &ResourceRef) -> &'static str {
        match resource {
            ResourceRef::Tool(_) => "tools",
            ResourceRef::Article(_) => "articles",
        }
    }

    /// Resolve a reference to its published catalog row.
    pub async fn resolve(
        pool: &PgPool,
        resource: &ResourceRef,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let table = Self::table_for(resource);
        let query = format!("SELECT {COLUMNS} FROM {table} WHERE id = $1 AND published = true");
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(resource.id())
            .fetch_optional(pool)
            .await
    }

    /// List published tools, newest first.
    pub async fn list_tools(pool: &PgPool) -> Result<Vec<ResourceSummary>, sqlx::Error> {
        sqlx::query_as::<_, ResourceSummary>(
            "SELECT id, title, slug FROM tools \
             WHERE published = true \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// List published articles, newest first.
    pub async fn list_articles(pool: &PgPool) -> Result<Vec<ResourceSummary>, sqlx::Error> {
        sqlx::query_as::<_, ResourceSummary>(
            "SELECT id, title, slug FROM articles \
             WHERE published = true \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert a tool row. Used by the admin side and test seeding.
    pub async fn create_tool(
        pool: &PgPool,
        title: &str,
        slug: &str,
        file_path: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO tools (title, slug, file_path) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(title)
            .bind(slug)
            .bind(file_path)
            .fetch_one(pool)
            .await
    }

    /// Insert an article row. Used by the admin side and test seeding.
    pub async fn create_article(
        pool: &PgPool,
        title: &str,
        slug: &str,
        file_path: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, slug, file_path) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(title)
            .bind(slug)
            .bind(file_path)
            .fetch_one(pool)
            .await
    }

    /// Unpublish an entry, hiding it from listings and resolution.
    pub async fn set_published(
        pool: &PgPool,
        resource: &ResourceRef,
        published: bool,
    ) -> Result<bool, sqlx::Error> {
        let table = Self::table_for(resource);
        let query = format!("UPDATE {table} SET published = $2 WHERE id = $1");
        let result = sqlx::query(&query)
            .bind(resource.id())
            .bind(published)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
