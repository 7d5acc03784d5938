pub mod get;
pub mod patch;

pub use get::{get_aggregate, get_all_aggregates};
pub use patch::recompute_aggregate;
