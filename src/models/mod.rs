pub mod aggregate;
pub mod leaderboard;
pub mod rating;

pub use rating::Rating;
