use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::access::{CategoryIndex, CategoryLookup};
use crate::db::{Category, DatabaseError};

use super::sqlstate;

// SQLSTATE raised when the category join tables were never migrated. The
// restriction feature is optional per deployment: its absence means
// "unrestricted", never "deny all" and never an error. Any other failure
// stays an error.
const UNDEFINED_TABLE: &str = "42P01";

pub struct CategoryRepository;

impl CategoryRepository {
    /// All known category tags. An unprovisioned deployment simply has none.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, DatabaseError> {
        let result =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(pool)
                .await;

        match result {
            Ok(categories) => Ok(categories),
            Err(err) if sqlstate(&err).as_deref() == Some(UNDEFINED_TABLE) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Category index backed by the `account_categories` / `course_categories`
/// join tables.
pub struct PgCategoryIndex {
    pool: PgPool,
}

impl PgCategoryIndex {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, query: &str, id: Uuid) -> Result<CategoryLookup, DatabaseError> {
        let result = sqlx::query_scalar::<_, Uuid>(query)
            .bind(id)
            .fetch_all(&self.pool)
            .await;

        match result {
            Ok(ids) => Ok(CategoryLookup::Restricted(ids.into_iter().collect())),
            Err(err) if sqlstate(&err).as_deref() == Some(UNDEFINED_TABLE) => {
                Ok(CategoryLookup::Unrestricted)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl CategoryIndex for PgCategoryIndex {
    async fn account_categories(&self, account_id: Uuid) -> Result<CategoryLookup, DatabaseError> {
        self.fetch(
            "SELECT category_id FROM account_categories WHERE account_id = $1",
            account_id,
        )
        .await
    }

    async fn course_categories(&self, course_id: Uuid) -> Result<CategoryLookup, DatabaseError> {
        self.fetch(
            "SELECT category_id FROM course_categories WHERE course_id = $1",
            course_id,
        )
        .await
    }
}
