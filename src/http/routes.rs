use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        aggregate_stats_handler, delete_rating_handler, detailed_stats_handler,
        get_ratings_handler, leaderboard_handler, my_rating_handler, ratings_given_handler,
        submit_rating_handler, update_rating_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/users/{target_id}/rating",
            post(submit_rating_handler)
                .put(update_rating_handler)
                .delete(delete_rating_handler)
                .get(get_ratings_handler),
        )
        .route("/users/{target_id}/rating/me", get(my_rating_handler))
        .route("/users/{target_id}/rating/stats", get(aggregate_stats_handler))
        .route(
            "/users/{target_id}/rating/detailed-stats",
            get(detailed_stats_handler),
        )
        .route("/users/me/ratings", get(ratings_given_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .with_state(state)
}
