// src/db/menu_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::store::MenuSource, models::restaurant::Category};

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuSource for MenuRepository {
    async fn list_categories(&self, restaurant_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, restaurant_id, name FROM categories WHERE restaurant_id = $1 ORDER BY name ASC",
        )
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }
}
