pub mod aggregate;
pub mod rating;

use sqlx::{PgPool, Postgres, pool::PoolConnection};

use crate::errors::AppError;

pub async fn acquire(postgres: &PgPool) -> Result<PoolConnection<Postgres>, AppError> {
    postgres
        .acquire()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to acquire connection: {}", e)))
}
