use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{CarStore, ChangeSet, RepositoryError};
use crate::constants::API_NAME;
use crate::models::{Car, ResourceParameters};

#[derive(Clone)]
pub struct PgCarStore {
    pool: PgPool,
}

impl PgCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn list(&self, params: &ResourceParameters) -> Result<Vec<Car>, RepositoryError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, brand_name, model_name, year_of_construction FROM cars",
        );

        if let Some(brand) = &params.brand_name {
            query.push(" WHERE brand_name = ").push_bind(brand.clone());
        }
        query.push(" ORDER BY id");

        if let Some((offset, limit)) = params.page_window() {
            query
                .push(" LIMIT ")
                .push_bind(limit as i64)
                .push(" OFFSET ")
                .push_bind(offset as i64);
        }

        let cars = query.build_query_as::<Car>().fetch_all(&self.pool).await?;
        Ok(cars)
    }

    async fn find(&self, id: i32) -> Result<Option<Car>, RepositoryError> {
        let car = sqlx::query_as::<_, Car>(
            "SELECT id, brand_name, model_name, year_of_construction FROM cars WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(car)
    }

    async fn apply(&self, changes: ChangeSet) -> Result<Vec<Car>, RepositoryError> {
        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin().await?;

        for id in &changes.deletes {
            let result = sqlx::query("DELETE FROM cars WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(RepositoryError::MissingRow(*id));
            }
        }

        for car in &changes.updates {
            let result = sqlx::query(
                "UPDATE cars SET brand_name = $1, model_name = $2, year_of_construction = $3 WHERE id = $4",
            )
            .bind(&car.brand_name)
            .bind(&car.model_name)
            .bind(car.year_of_construction)
            .bind(car.id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(RepositoryError::MissingRow(car.id));
            }
        }

        let mut created = Vec::with_capacity(changes.inserts.len());
        for new_car in &changes.inserts {
            let car = sqlx::query_as::<_, Car>(
                "INSERT INTO cars (brand_name, model_name, year_of_construction) VALUES ($1, $2, $3) \
                 RETURNING id, brand_name, model_name, year_of_construction",
            )
            .bind(&new_car.brand_name)
            .bind(&new_car.model_name)
            .bind(new_car.year_of_construction)
            .fetch_one(&mut *tx)
            .await?;
            created.push(car);
        }

        tx.commit().await?;

        tracing::debug!(
            "{} Committed {} insert(s), {} update(s), {} delete(s)",
            API_NAME,
            created.len(),
            changes.updates.len(),
            changes.deletes.len()
        );
        Ok(created)
    }
}
