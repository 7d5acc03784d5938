pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_rating;
pub use get::{get_rating, get_ratings_by_rater, get_ratings_for_target};
pub use patch::update_rating;
pub use post::upsert_rating;
