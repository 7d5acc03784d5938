use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    db::rating::get_ratings_for_target, errors::AppError, models::aggregate::AggregateSnapshot,
};

/// Rebuild the aggregate row for a target from its full current rating set.
///
/// Must run on the same connection (transaction) as the rating mutation that
/// preceded it, so it never sees a set missing or duplicating the row just
/// written. An empty set removes the aggregate row entirely. The row is
/// replaced whole; no field-level updates.
pub async fn recompute_aggregate(
    conn: &mut PgConnection,
    target_user_id: Uuid,
) -> Result<(), AppError> {
    let ratings = get_ratings_for_target(&mut *conn, target_user_id).await?;

    let Some(snapshot) = AggregateSnapshot::from_ratings(&ratings) else {
        sqlx::query("DELETE FROM user_rating_aggregates WHERE target_user_id = $1")
            .bind(target_user_id)
            .execute(conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete aggregate: {}", e)))?;

        tracing::info!("Removed aggregate for {}: no ratings left", target_user_id);
        return Ok(());
    };

    sqlx::query(
        "INSERT INTO user_rating_aggregates (target_user_id,
            average_trust_score, median_trust_score,
            average_engagement_score, median_engagement_score,
            average_experience_score, median_experience_score,
            average_total_score, median_total_score,
            min_total_score, max_total_score, total_ratings_count, last_updated)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, now())
        ON CONFLICT (target_user_id) DO UPDATE SET
            average_trust_score = EXCLUDED.average_trust_score,
            median_trust_score = EXCLUDED.median_trust_score,
            average_engagement_score = EXCLUDED.average_engagement_score,
            median_engagement_score = EXCLUDED.median_engagement_score,
            average_experience_score = EXCLUDED.average_experience_score,
            median_experience_score = EXCLUDED.median_experience_score,
            average_total_score = EXCLUDED.average_total_score,
            median_total_score = EXCLUDED.median_total_score,
            min_total_score = EXCLUDED.min_total_score,
            max_total_score = EXCLUDED.max_total_score,
            total_ratings_count = EXCLUDED.total_ratings_count,
            last_updated = now()",
    )
    .bind(target_user_id)
    .bind(snapshot.average_trust_score)
    .bind(snapshot.median_trust_score)
    .bind(snapshot.average_engagement_score)
    .bind(snapshot.median_engagement_score)
    .bind(snapshot.average_experience_score)
    .bind(snapshot.median_experience_score)
    .bind(snapshot.average_total_score)
    .bind(snapshot.median_total_score)
    .bind(snapshot.min_total_score)
    .bind(snapshot.max_total_score)
    .bind(snapshot.total_ratings_count)
    .execute(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to upsert aggregate: {}", e)))?;

    tracing::info!(
        "Recomputed aggregate for {}: count={}, avg_total={}",
        target_user_id,
        snapshot.total_ratings_count,
        snapshot.average_total_score
    );

    Ok(())
}
