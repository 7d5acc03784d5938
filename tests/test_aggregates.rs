use chrono::Utc;
use travel_buddy_be::models::Rating;
use travel_buddy_be::models::aggregate::{
    AggregateSnapshot, ScoreRanges, UserRatingAggregate, mean, median,
};
use travel_buddy_be::models::leaderboard::build_leaderboard;
use travel_buddy_be::models::rating::RatingUpdate;
use travel_buddy_be::score::compute_total;
use uuid::Uuid;

fn sample_rating(target: u128, rater: u128, trust: f64, engagement: f64, experience: f64) -> Rating {
    Rating {
        target_user_id: Uuid::from_u128(target),
        rater_user_id: Uuid::from_u128(rater),
        trust_score: trust,
        engagement_score: engagement,
        experience_score: experience,
        total_score: compute_total(trust, engagement, experience),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn aggregate_with_average(target: u128, average_total: f64) -> UserRatingAggregate {
    let mut aggregate = UserRatingAggregate::empty(Uuid::from_u128(target));
    aggregate.average_total_score = average_total;
    aggregate.total_ratings_count = 1;
    aggregate
}

#[test]
fn test_median_odd_count() {
    assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
    // Input order must not matter.
    assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
}

#[test]
fn test_median_even_count() {
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    assert_eq!(median(&[4.0, 2.0, 1.0, 3.0]), 2.5);
}

#[test]
fn test_mean_and_empty_inputs() {
    assert_eq!(mean(&[1.0, 2.0]), 1.5);
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(median(&[]), 0.0);
    assert_eq!(median(&[4.2]), 4.2);
}

#[test]
fn test_snapshot_of_empty_set_is_none() {
    assert_eq!(AggregateSnapshot::from_ratings(&[]), None);
}

#[test]
fn test_snapshot_statistics() {
    let ratings = vec![
        sample_rating(7, 1, 5.0, 5.0, 5.0), // total 5.0
        sample_rating(7, 2, 4.0, 4.0, 4.0), // total 4.0
        sample_rating(7, 3, 3.0, 3.0, 3.0), // total 3.0
    ];

    let snapshot = AggregateSnapshot::from_ratings(&ratings).unwrap();
    assert_eq!(snapshot.total_ratings_count, 3);
    assert_eq!(snapshot.average_trust_score, 4.0);
    assert_eq!(snapshot.median_trust_score, 4.0);
    assert_eq!(snapshot.average_total_score, 4.0);
    assert_eq!(snapshot.median_total_score, 4.0);
    assert_eq!(snapshot.min_total_score, 3.0);
    assert_eq!(snapshot.max_total_score, 5.0);
}

#[test]
fn test_snapshot_single_rating() {
    let ratings = vec![sample_rating(20, 10, 5.0, 4.0, 3.0)];

    let snapshot = AggregateSnapshot::from_ratings(&ratings).unwrap();
    assert_eq!(snapshot.total_ratings_count, 1);
    assert_eq!(snapshot.average_total_score, 4.15);
    assert_eq!(snapshot.min_total_score, 4.15);
    assert_eq!(snapshot.max_total_score, 4.15);
}

#[test]
fn test_snapshot_is_idempotent() {
    let ratings = vec![
        sample_rating(3, 1, 4.5, 3.0, 2.0),
        sample_rating(3, 2, 1.0, 5.0, 4.0),
        sample_rating(3, 4, 2.5, 2.5, 2.5),
    ];

    let first = AggregateSnapshot::from_ratings(&ratings).unwrap();
    let second = AggregateSnapshot::from_ratings(&ratings).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_average_total_matches_mean_of_stored_totals() {
    let ratings = vec![
        sample_rating(9, 1, 4.5, 3.0, 2.0),
        sample_rating(9, 2, 1.0, 5.0, 4.0),
        sample_rating(9, 3, 0.5, 2.0, 3.5),
    ];

    let totals: Vec<f64> = ratings.iter().map(|r| r.total_score).collect();
    let snapshot = AggregateSnapshot::from_ratings(&ratings).unwrap();
    assert_eq!(snapshot.average_total_score, mean(&totals));
}

#[test]
fn test_score_ranges_per_axis() {
    let ratings = vec![
        sample_rating(6, 1, 1.0, 4.0, 2.0),
        sample_rating(6, 2, 3.0, 2.0, 5.0),
    ];

    let ranges = ScoreRanges::from_ratings(&ratings);
    assert_eq!(ranges.trust.min, 1.0);
    assert_eq!(ranges.trust.max, 3.0);
    assert_eq!(ranges.engagement.min, 2.0);
    assert_eq!(ranges.engagement.max, 4.0);
    assert_eq!(ranges.experience.min, 2.0);
    assert_eq!(ranges.experience.max, 5.0);

    let empty = ScoreRanges::from_ratings(&[]);
    assert_eq!(empty.total.min, 0.0);
    assert_eq!(empty.total.max, 0.0);
}

#[test]
fn test_partial_update_keeps_absent_fields() {
    let current = sample_rating(2, 1, 5.0, 4.0, 3.0);
    let update = RatingUpdate {
        trust_score: Some(1.0),
        ..Default::default()
    };

    let (trust, engagement, experience, total) = update.apply_to(&current);
    assert_eq!(trust, 1.0);
    assert_eq!(engagement, 4.0);
    assert_eq!(experience, 3.0);
    // 0.40*1 + 0.35*4 + 0.25*3
    assert_eq!(total, 2.55);
}

#[test]
fn test_empty_partial_update_recomputes_same_total() {
    let current = sample_rating(2, 1, 4.5, 3.0, 2.0);
    let (trust, engagement, experience, total) = RatingUpdate::default().apply_to(&current);

    assert_eq!(trust, current.trust_score);
    assert_eq!(engagement, current.engagement_score);
    assert_eq!(experience, current.experience_score);
    assert_eq!(total, current.total_score);
}

#[test]
fn test_leaderboard_orders_descending_and_truncates() {
    let aggregates = vec![
        aggregate_with_average(1, 3.0),
        aggregate_with_average(2, 4.9),
        aggregate_with_average(3, 3.5),
        aggregate_with_average(4, 4.5),
        aggregate_with_average(5, 4.0),
    ];

    let leaderboard = build_leaderboard(aggregates, 3);
    assert_eq!(leaderboard.len(), 3);
    assert_eq!(leaderboard[0].target_user_id, Uuid::from_u128(2));
    assert_eq!(leaderboard[1].target_user_id, Uuid::from_u128(4));
    assert_eq!(leaderboard[2].target_user_id, Uuid::from_u128(5));
    assert_eq!(leaderboard[0].rank, 1);
    assert_eq!(leaderboard[1].rank, 2);
    assert_eq!(leaderboard[2].rank, 3);
}

#[test]
fn test_leaderboard_ties_break_by_user_id_ascending() {
    let aggregates = vec![
        aggregate_with_average(9, 4.0),
        aggregate_with_average(1, 4.0),
        aggregate_with_average(5, 4.0),
    ];

    let leaderboard = build_leaderboard(aggregates, 10);
    assert_eq!(leaderboard[0].target_user_id, Uuid::from_u128(1));
    assert_eq!(leaderboard[1].target_user_id, Uuid::from_u128(5));
    assert_eq!(leaderboard[2].target_user_id, Uuid::from_u128(9));
}
