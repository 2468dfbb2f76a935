// src/db/staff_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::StaffSource,
    models::{order::Staff, principal::Role},
};

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffSource for StaffRepository {
    async fn list_active_staff(
        &self,
        restaurant_ids: &[Uuid],
        roles: &[Role],
    ) -> Result<Vec<Staff>, AppError> {
        let roles: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();

        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT id, restaurant_id, organization_id, role, is_active
            FROM staff
            WHERE restaurant_id = ANY($1)
              AND is_active = true
              AND role::text = ANY($2)
            "#,
        )
            .bind(restaurant_ids)
            .bind(&roles)
            .fetch_all(&self.pool)
            .await?;

        Ok(staff)
    }
}
