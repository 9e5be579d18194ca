//! Movie catalog types and the rating policy.
//!
//! The policy functions here are pure; the store adapters call
//! [`fold_rating`] (or the equivalent SQL expression) so the running
//! average is computed in exactly one place per backend.

use serde::Serialize;

/// Lowest accepted rating value.
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating value.
pub const MAX_RATING: i64 = 10;

/// A catalog entry together with its rating aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRating {
    pub name: String,
    pub average_rating: f64,
    pub rating_count: i64,
}

/// Result of folding one rating into a movie's aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    pub average_rating: f64,
    pub rating_count: i64,
}

/// Rating-domain error type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating should be in the range [1, 10]")]
    OutOfRange(i64),
}

/// Validate a rating value is within the allowed range [1, 10].
pub fn validate_rating(rating: i64) -> Result<(), RatingError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(RatingError::OutOfRange(rating));
    }
    Ok(())
}

/// Fold a new rating into a running average.
///
/// `new_average = (average * count + rating) / (count + 1)`.
pub fn fold_rating(current: RatingAggregate, rating: i64) -> RatingAggregate {
    let count = current.rating_count + 1;
    let total = current.average_rating * current.rating_count as f64 + rating as f64;
    RatingAggregate {
        average_rating: total / count as f64,
        rating_count: count,
    }
}

/// Normalize free-text movie input for catalog lookup.
///
/// Trims the ends and collapses inner whitespace runs to a single space.
/// Returns `None` when nothing is left.
pub fn normalize_title(input: &str) -> Option<String> {
    let joined = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
