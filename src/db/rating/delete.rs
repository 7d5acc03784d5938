use sqlx::PgConnection;
use uuid::Uuid;

use crate::errors::AppError;

pub async fn delete_rating(
    conn: &mut PgConnection,
    target_user_id: Uuid,
    rater_user_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "DELETE FROM ratings WHERE target_user_id = $1 AND rater_user_id = $2",
    )
    .bind(target_user_id)
    .bind(rater_user_id)
    .execute(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to delete rating: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Rating not found".into()));
    }

    tracing::info!("Deleted rating of {} by {}", target_user_id, rater_user_id);

    Ok(())
}
