use chrono::Utc;
use travel_buddy_be::errors::AppError;
use travel_buddy_be::models::Rating;
use travel_buddy_be::ratings::{ensure_not_self, validate_leaderboard_limit, validate_score};
use travel_buddy_be::score::{compute_total, round2};
use uuid::Uuid;

#[test]
fn test_weighted_formula() {
    // 0.40*5 + 0.35*4 + 0.25*3 = 2.0 + 1.4 + 0.75
    assert_eq!(compute_total(5.0, 4.0, 3.0), 4.15);
    assert_eq!(compute_total(0.0, 0.0, 0.0), 0.0);
    assert_eq!(compute_total(5.0, 5.0, 5.0), 5.0);
    assert_eq!(compute_total(1.0, 2.0, 3.0), 1.85);
    assert_eq!(compute_total(3.0, 3.0, 3.0), 3.0);
}

#[test]
fn test_total_stays_in_range() {
    // Sweep the whole input grid in half-point steps.
    for t in 0..=10 {
        for e in 0..=10 {
            for x in 0..=10 {
                let total =
                    compute_total(t as f64 * 0.5, e as f64 * 0.5, x as f64 * 0.5);
                assert!(
                    (0.0..=5.0).contains(&total),
                    "total {} out of range for ({}, {}, {})",
                    total,
                    t,
                    e,
                    x
                );
            }
        }
    }
}

#[test]
fn test_rounding_is_half_away_from_zero() {
    // 0.125 is exactly representable, so this pins the rounding mode.
    assert_eq!(round2(0.125), 0.13);
    assert_eq!(round2(-0.125), -0.13);
    assert_eq!(round2(3.14159), 3.14);
    assert_eq!(round2(2.0), 2.0);
}

#[test]
fn test_score_range_validation() {
    assert!(validate_score("trustScore", 0.0).is_ok());
    assert!(validate_score("trustScore", 5.0).is_ok());
    assert!(validate_score("trustScore", 2.5).is_ok());

    let err = validate_score("trustScore", 5.5).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(validate_score("engagementScore", -0.1).is_err());
    assert!(validate_score("experienceScore", f64::NAN).is_err());
}

#[test]
fn test_self_rating_is_forbidden() {
    let user = Uuid::from_u128(5);
    let err = ensure_not_self(user, user).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    assert!(ensure_not_self(Uuid::from_u128(1), Uuid::from_u128(2)).is_ok());
}

#[test]
fn test_leaderboard_limit_bounds() {
    assert!(validate_leaderboard_limit(1).is_ok());
    assert!(validate_leaderboard_limit(10).is_ok());
    assert!(validate_leaderboard_limit(100).is_ok());

    assert!(matches!(
        validate_leaderboard_limit(0).unwrap_err(),
        AppError::BadRequest(_)
    ));
    assert!(matches!(
        validate_leaderboard_limit(101).unwrap_err(),
        AppError::BadRequest(_)
    ));
}

#[test]
fn test_rating_serializes_camel_case() {
    let rating = Rating {
        target_user_id: Uuid::from_u128(20),
        rater_user_id: Uuid::from_u128(10),
        trust_score: 5.0,
        engagement_score: 4.0,
        experience_score: 3.0,
        total_score: compute_total(5.0, 4.0, 3.0),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = serde_json::to_value(&rating).unwrap();
    assert_eq!(json["totalScore"], 4.15);
    assert!(json.get("targetUserId").is_some());
    assert!(json.get("raterUserId").is_some());
    assert!(json.get("trustScore").is_some());
    assert!(json.get("target_user_id").is_none());
}
