use sqlx::PgPool;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::middleware::MutationRateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub postgres: PgPool,
    pub rating_guards: RatingGuards,
    pub mutation_limiter: MutationRateLimiter,
}

/// One async guard per target user. Holding the guard across a rating
/// mutation and the following aggregate recompute serializes concurrent
/// writers for the same target.
pub type RatingGuards = Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>;

pub async fn target_guard(guards: &RatingGuards, target_user_id: Uuid) -> Arc<Mutex<()>> {
    let mut map = guards.lock().await;
    map.entry(target_user_id).or_default().clone()
}
