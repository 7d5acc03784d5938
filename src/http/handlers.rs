use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    errors::AppError,
    models::{
        Rating,
        aggregate::{DetailedStats, UserRatingAggregate},
        leaderboard::LeaderBoardEntry,
        rating::{RatingUpdate, SimpleRatings},
    },
    ratings,
    state::AppState,
};

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

fn rater_id(claims: &crate::auth::Claims) -> Result<Uuid, (StatusCode, String)> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".into()).to_response())
}

fn check_mutation_limit(state: &AppState, rater: Uuid) -> Result<(), (StatusCode, String)> {
    if state.mutation_limiter.check_key(&rater).is_err() {
        tracing::warn!("Mutation rate limit exceeded for user: {}", rater);
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            "Too many rating changes, slow down".into(),
        ));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingPayload {
    pub trust_score: f64,
    pub engagement_score: f64,
    pub experience_score: f64,
}

#[axum::debug_handler]
pub async fn submit_rating_handler(
    Path(target_id): Path<Uuid>,
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<SubmitRatingPayload>,
) -> Result<Json<Rating>, (StatusCode, String)> {
    let rater = rater_id(&claims)?;
    check_mutation_limit(&state, rater)?;

    let rating = ratings::submit_rating(
        rater,
        target_id,
        payload.trust_score,
        payload.engagement_score,
        payload.experience_score,
        state.postgres.clone(),
        state.rating_guards.clone(),
    )
    .await
    .map_err(|e| e.to_response())?;

    Ok(Json(rating))
}

pub async fn update_rating_handler(
    Path(target_id): Path<Uuid>,
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<RatingUpdate>,
) -> Result<Json<Rating>, (StatusCode, String)> {
    let rater = rater_id(&claims)?;
    check_mutation_limit(&state, rater)?;

    let rating = ratings::update_rating(
        rater,
        target_id,
        payload,
        state.postgres.clone(),
        state.rating_guards.clone(),
    )
    .await
    .map_err(|e| e.to_response())?;

    Ok(Json(rating))
}

pub async fn delete_rating_handler(
    Path(target_id): Path<Uuid>,
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    let rater = rater_id(&claims)?;
    check_mutation_limit(&state, rater)?;

    ratings::delete_rating(
        rater,
        target_id,
        state.postgres.clone(),
        state.rating_guards.clone(),
    )
    .await
    .map_err(|e| e.to_response())?;

    Ok(Json("Rating deleted"))
}

pub async fn get_ratings_handler(
    Path(target_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SimpleRatings>, (StatusCode, String)> {
    let summary = ratings::get_simple_ratings(target_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(summary))
}

pub async fn my_rating_handler(
    Path(target_id): Path<Uuid>,
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<Option<Rating>>, (StatusCode, String)> {
    let rater = rater_id(&claims)?;

    let rating = ratings::get_rating(target_id, rater, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(rating))
}

pub async fn ratings_given_handler(
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<Vec<Rating>>, (StatusCode, String)> {
    let rater = rater_id(&claims)?;

    let given = ratings::get_ratings_by_rater(rater, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(given))
}

pub async fn aggregate_stats_handler(
    Path(target_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<UserRatingAggregate>, (StatusCode, String)> {
    let stats = ratings::get_aggregate_stats(target_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(stats))
}

pub async fn detailed_stats_handler(
    Path(target_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<DetailedStats>, (StatusCode, String)> {
    let stats = ratings::get_detailed_stats(target_id, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(stats))
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

pub async fn leaderboard_handler(
    Query(query): Query<LeaderboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderBoardEntry>>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);

    let leaderboard = ratings::get_leaderboard(limit, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(leaderboard))
}
