//! Per-item scoring formulas used by the rankings.
use chrono::{DateTime, Utc};
use ranking_shared::types::Votable;

/// Day zero of the hot score, in Unix seconds.
///
/// Historical artifact of Reddit's published algorithm. Arbitrary, and must not
/// change or hot scores stop being comparable with existing rankings.
pub const REFERENCE_EPOCH_SECS: i64 = 1_134_028_003;

/// Seconds of age that weigh as much as one order of magnitude of net score.
pub const HOT_DECAY_SECS: f64 = 45_000.0;

/// Hours added to an item's age before the rising decay is applied.
pub const RISING_AGE_OFFSET_HOURS: f64 = 2.0;

/// Exponent of the rising age decay.
pub const RISING_GRAVITY: f64 = 1.5;

/// Exponent applied to the total vote volume in the controversy denominator.
pub const CONTROVERSY_VOLUME_EXPONENT: f64 = 1.2;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// `sign(score) * log10(max(|score|, 1)) + (created_at - REFERENCE_EPOCH) / 45000`.
pub fn hot_score<T: Votable>(item: &T) -> f64 {
    let score = item.score();
    let sign = score.signum() as f64;
    let order = (score.unsigned_abs().max(1) as f64).log10();
    let created_secs = item.created_at().timestamp_millis() as f64 / 1000.0;
    let seconds = created_secs - REFERENCE_EPOCH_SECS as f64;

    sign * order + seconds / HOT_DECAY_SECS
}

/// `score / (age_hours + 2)^1.5`, with age measured at `now`.
///
/// Items stamped after `now` are treated as brand new (zero age).
pub fn rising_score<T: Votable>(item: &T, now: DateTime<Utc>) -> f64 {
    let age_millis = (now - item.created_at()).num_milliseconds().max(0);
    let age_hours = age_millis as f64 / MILLIS_PER_HOUR;

    item.score() as f64 / (age_hours + RISING_AGE_OFFSET_HOURS).powf(RISING_GRAVITY)
}

/// `(up * down) / (up + down)^1.2`, or zero unless both sides have votes.
pub fn controversy_score<T: Votable>(item: &T) -> f64 {
    let upvotes = item.upvotes();
    let downvotes = item.downvotes();
    if upvotes == 0 || downvotes == 0 {
        return 0.0;
    }

    let upvotes = upvotes as f64;
    let downvotes = downvotes as f64;
    (upvotes * downvotes) / (upvotes + downvotes).powf(CONTROVERSY_VOLUME_EXPONENT)
}
