use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    db::rating::get::get_rating,
    errors::AppError,
    models::{Rating, rating::RatingUpdate},
};

/// Partial update of an existing rating. Absent fields keep their stored
/// values; the total is always recomputed from the resulting full triple.
pub async fn update_rating(
    conn: &mut PgConnection,
    target_user_id: Uuid,
    rater_user_id: Uuid,
    update: RatingUpdate,
) -> Result<Rating, AppError> {
    let current = get_rating(&mut *conn, target_user_id, rater_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Rating not found".into()))?;

    let (trust_score, engagement_score, experience_score, total_score) =
        update.apply_to(&current);

    let rating = sqlx::query_as::<_, Rating>(
        "UPDATE ratings SET
            trust_score = $3,
            engagement_score = $4,
            experience_score = $5,
            total_score = $6,
            updated_at = now()
        WHERE target_user_id = $1 AND rater_user_id = $2
        RETURNING target_user_id, rater_user_id, trust_score, engagement_score,
            experience_score, total_score, created_at, updated_at",
    )
    .bind(target_user_id)
    .bind(rater_user_id)
    .bind(trust_score)
    .bind(engagement_score)
    .bind(experience_score)
    .bind(total_score)
    .fetch_one(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update rating: {}", e)))?;

    tracing::info!(
        "Updated rating of {} by {}: total={}",
        target_user_id,
        rater_user_id,
        rating.total_score
    );

    Ok(rating)
}
