// src/db/restaurant_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::RestaurantDirectory,
    models::restaurant::Restaurant,
};

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantDirectory for RestaurantRepository {
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, AppError> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, organization_id, name, metadata, is_active
            FROM restaurants
            WHERE id = $1
            "#,
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(restaurant)
    }

    async fn find_restaurant_in_organization(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Restaurant>, AppError> {
        // O filtro por organização fica no SQL: um restaurante de outra
        // organização é indistinguível de um que não existe.
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, organization_id, name, metadata, is_active
            FROM restaurants
            WHERE id = $1 AND organization_id = $2
            "#,
        )
            .bind(id)
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(restaurant)
    }

    async fn list_restaurants(&self, organization_id: Uuid) -> Result<Vec<Restaurant>, AppError> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, organization_id, name, metadata, is_active
            FROM restaurants
            WHERE organization_id = $1
            ORDER BY name ASC, id ASC
            "#,
        )
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(restaurants)
    }

    async fn list_active_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, organization_id, name, metadata, is_active
            FROM restaurants
            WHERE is_active = true
            ORDER BY name ASC, id ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(restaurants)
    }
}
