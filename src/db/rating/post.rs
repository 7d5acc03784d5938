use sqlx::PgConnection;
use uuid::Uuid;

use crate::{errors::AppError, models::Rating, score::compute_total};

/// Insert the rating for (target, rater), or overwrite all four score fields
/// in place if one already exists. `updated_at` is bumped on overwrite.
pub async fn upsert_rating(
    conn: &mut PgConnection,
    target_user_id: Uuid,
    rater_user_id: Uuid,
    trust_score: f64,
    engagement_score: f64,
    experience_score: f64,
) -> Result<Rating, AppError> {
    let total_score = compute_total(trust_score, engagement_score, experience_score);

    let rating = sqlx::query_as::<_, Rating>(
        "INSERT INTO ratings (target_user_id, rater_user_id, trust_score,
                engagement_score, experience_score, total_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (target_user_id, rater_user_id) DO UPDATE SET
            trust_score = EXCLUDED.trust_score,
            engagement_score = EXCLUDED.engagement_score,
            experience_score = EXCLUDED.experience_score,
            total_score = EXCLUDED.total_score,
            updated_at = now()
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
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Rating was written concurrently, retry the request".into())
        }
        _ => AppError::DatabaseError(format!("Failed to upsert rating: {}", e)),
    })?;

    tracing::info!(
        "Stored rating of {} by {}: total={}",
        target_user_id,
        rater_user_id,
        rating.total_score
    );

    Ok(rating)
}
