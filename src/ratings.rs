//! Rating service: validation, self-rating prevention, and the
//! mutate-then-recompute orchestration over the rating store and the
//! aggregate maintainer.
//!
//! Every mutation for a target runs under that target's guard and inside a
//! single transaction covering both the rating row and the aggregate row, so
//! a recompute always sees exactly the rating set the mutation produced.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{
        Rating,
        aggregate::{DetailedStats, ScoreRanges, UserRatingAggregate},
        leaderboard::{LeaderBoardEntry, build_leaderboard},
        rating::{RatingUpdate, SimpleRatings},
    },
    score::round2,
    state::{RatingGuards, target_guard},
};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 5.0;
pub const LEADERBOARD_LIMIT_MIN: usize = 1;
pub const LEADERBOARD_LIMIT_MAX: usize = 100;
const RECENT_RATINGS_COUNT: usize = 5;

pub fn validate_score(field: &str, value: f64) -> Result<(), AppError> {
    // NaN fails the range check as well.
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{} must be between {} and {}",
            field, SCORE_MIN, SCORE_MAX
        )));
    }
    Ok(())
}

pub fn ensure_not_self(rater_user_id: Uuid, target_user_id: Uuid) -> Result<(), AppError> {
    if rater_user_id == target_user_id {
        return Err(AppError::Forbidden("You cannot rate yourself".into()));
    }
    Ok(())
}

pub fn validate_leaderboard_limit(limit: usize) -> Result<(), AppError> {
    if !(LEADERBOARD_LIMIT_MIN..=LEADERBOARD_LIMIT_MAX).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between {} and {}",
            LEADERBOARD_LIMIT_MIN, LEADERBOARD_LIMIT_MAX
        )));
    }
    Ok(())
}

pub async fn submit_rating(
    rater_user_id: Uuid,
    target_user_id: Uuid,
    trust_score: f64,
    engagement_score: f64,
    experience_score: f64,
    postgres: PgPool,
    guards: RatingGuards,
) -> Result<Rating, AppError> {
    ensure_not_self(rater_user_id, target_user_id)?;
    validate_score("trustScore", trust_score)?;
    validate_score("engagementScore", engagement_score)?;
    validate_score("experienceScore", experience_score)?;

    let guard = target_guard(&guards, target_user_id).await;
    let _serialized = guard.lock().await;

    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

    let rating = db::rating::upsert_rating(
        &mut *tx,
        target_user_id,
        rater_user_id,
        trust_score,
        engagement_score,
        experience_score,
    )
    .await?;
    db::aggregate::recompute_aggregate(&mut *tx, target_user_id).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit rating: {}", e)))?;

    Ok(rating)
}

pub async fn update_rating(
    rater_user_id: Uuid,
    target_user_id: Uuid,
    update: RatingUpdate,
    postgres: PgPool,
    guards: RatingGuards,
) -> Result<Rating, AppError> {
    ensure_not_self(rater_user_id, target_user_id)?;
    if let Some(trust) = update.trust_score {
        validate_score("trustScore", trust)?;
    }
    if let Some(engagement) = update.engagement_score {
        validate_score("engagementScore", engagement)?;
    }
    if let Some(experience) = update.experience_score {
        validate_score("experienceScore", experience)?;
    }

    let guard = target_guard(&guards, target_user_id).await;
    let _serialized = guard.lock().await;

    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

    let rating = db::rating::update_rating(&mut *tx, target_user_id, rater_user_id, update).await?;
    db::aggregate::recompute_aggregate(&mut *tx, target_user_id).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit rating update: {}", e)))?;

    Ok(rating)
}

pub async fn delete_rating(
    rater_user_id: Uuid,
    target_user_id: Uuid,
    postgres: PgPool,
    guards: RatingGuards,
) -> Result<(), AppError> {
    ensure_not_self(rater_user_id, target_user_id)?;

    let guard = target_guard(&guards, target_user_id).await;
    let _serialized = guard.lock().await;

    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

    db::rating::delete_rating(&mut *tx, target_user_id, rater_user_id).await?;
    db::aggregate::recompute_aggregate(&mut *tx, target_user_id).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit rating delete: {}", e)))?;

    Ok(())
}

pub async fn get_rating(
    target_user_id: Uuid,
    rater_user_id: Uuid,
    postgres: PgPool,
) -> Result<Option<Rating>, AppError> {
    let mut conn = db::acquire(&postgres).await?;
    db::rating::get_rating(&mut conn, target_user_id, rater_user_id).await
}

pub async fn get_ratings_by_rater(
    rater_user_id: Uuid,
    postgres: PgPool,
) -> Result<Vec<Rating>, AppError> {
    let mut conn = db::acquire(&postgres).await?;
    db::rating::get_ratings_by_rater(&mut conn, rater_user_id).await
}

/// Count, per-axis averages computed directly from the rows, and the raw
/// rating list. Deliberately independent of the maintained aggregate so the
/// two can be cross-checked.
pub async fn get_simple_ratings(
    target_user_id: Uuid,
    postgres: PgPool,
) -> Result<SimpleRatings, AppError> {
    let mut conn = db::acquire(&postgres).await?;
    let ratings = db::rating::get_ratings_for_target(&mut conn, target_user_id).await?;

    let average = |values: &mut dyn Iterator<Item = f64>| {
        let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count == 0 { 0.0 } else { round2(sum / count as f64) }
    };

    Ok(SimpleRatings {
        total_ratings: ratings.len(),
        average_trust_score: average(&mut ratings.iter().map(|r| r.trust_score)),
        average_engagement_score: average(&mut ratings.iter().map(|r| r.engagement_score)),
        average_experience_score: average(&mut ratings.iter().map(|r| r.experience_score)),
        average_total_score: average(&mut ratings.iter().map(|r| r.total_score)),
        ratings,
    })
}

/// The maintained aggregate row; a target with no ratings gets zeroed stats.
pub async fn get_aggregate_stats(
    target_user_id: Uuid,
    postgres: PgPool,
) -> Result<UserRatingAggregate, AppError> {
    let mut conn = db::acquire(&postgres).await?;
    let aggregate = db::aggregate::get_aggregate(&mut conn, target_user_id).await?;
    Ok(aggregate.unwrap_or_else(|| UserRatingAggregate::empty(target_user_id)))
}

pub async fn get_detailed_stats(
    target_user_id: Uuid,
    postgres: PgPool,
) -> Result<DetailedStats, AppError> {
    let mut conn = db::acquire(&postgres).await?;
    let ratings = db::rating::get_ratings_for_target(&mut conn, target_user_id).await?;
    let aggregate = db::aggregate::get_aggregate(&mut conn, target_user_id)
        .await?
        .unwrap_or_else(|| UserRatingAggregate::empty(target_user_id));

    let score_ranges = ScoreRanges::from_ratings(&ratings);
    // Target list is ordered newest first already.
    let recent_ratings = ratings.into_iter().take(RECENT_RATINGS_COUNT).collect();

    Ok(DetailedStats {
        aggregate,
        score_ranges,
        recent_ratings,
    })
}

/// Top `limit` targets by average total score, drawn from the aggregate
/// table only. Ties order by target user id ascending.
pub async fn get_leaderboard(
    limit: usize,
    postgres: PgPool,
) -> Result<Vec<LeaderBoardEntry>, AppError> {
    validate_leaderboard_limit(limit)?;

    let mut conn = db::acquire(&postgres).await?;
    let aggregates = db::aggregate::get_all_aggregates(&mut conn).await?;

    Ok(build_leaderboard(aggregates, limit))
}
