//! Ranking functions for posts and comments.
//!
//! Every function takes a slice of [`Votable`] items and returns a new vector
//! holding exactly the same items, reordered. Inputs are never mutated.
//!
//! Sorting is stable: items with equal scores keep their input order.
//! Float scores are compared with [`f64::total_cmp`], so the order is total.
mod scores;

pub use scores::{
    controversy_score, hot_score, rising_score, CONTROVERSY_VOLUME_EXPONENT, HOT_DECAY_SECS,
    REFERENCE_EPOCH_SECS, RISING_AGE_OFFSET_HOURS, RISING_GRAVITY,
};

use chrono::{DateTime, Utc};
use ranking_shared::types::{SortMode, TimeWindow, Votable};

/// Ranks `items` by `mode`, evaluating time-dependent modes at the current instant.
///
/// `window` is only consulted by [`SortMode::Top`] and defaults to
/// [`TimeWindow::All`].
pub fn rank<T: Votable + Clone>(
    items: &[T],
    mode: SortMode,
    window: Option<TimeWindow>,
) -> Vec<T> {
    rank_at(items, mode, window, Utc::now())
}

/// Same as [`rank`], with an explicit evaluation instant.
pub fn rank_at<T: Votable + Clone>(
    items: &[T],
    mode: SortMode,
    window: Option<TimeWindow>,
    now: DateTime<Utc>,
) -> Vec<T> {
    match mode {
        SortMode::Hot => hot(items),
        SortMode::New => new(items),
        SortMode::Top => top_at(items, window.unwrap_or_default(), now),
        SortMode::Rising => rising_at(items, now),
        SortMode::Controversial => controversial(items),
    }
}

/// Most recently created first.
pub fn new<T: Votable + Clone>(items: &[T]) -> Vec<T> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    ranked
}

/// Items created within `window` of now, highest net score first.
pub fn top<T: Votable + Clone>(items: &[T], window: TimeWindow) -> Vec<T> {
    top_at(items, window, Utc::now())
}

/// Items created at or after `now - window`, highest net score first.
pub fn top_at<T: Votable + Clone>(items: &[T], window: TimeWindow, now: DateTime<Utc>) -> Vec<T> {
    let cutoff = window.duration().map(|span| now - span);
    let mut ranked: Vec<T> = items
        .iter()
        .filter(|item| cutoff.map_or(true, |cutoff| item.created_at() >= cutoff))
        .cloned()
        .collect();
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked
}

/// Highest [`hot_score`] first.
pub fn hot<T: Votable + Clone>(items: &[T]) -> Vec<T> {
    sort_by_score_desc(items, hot_score)
}

/// Highest [`rising_score`] at the current instant first.
pub fn rising<T: Votable + Clone>(items: &[T]) -> Vec<T> {
    rising_at(items, Utc::now())
}

/// Highest [`rising_score`] at `now` first.
pub fn rising_at<T: Votable + Clone>(items: &[T], now: DateTime<Utc>) -> Vec<T> {
    sort_by_score_desc(items, |item| rising_score(item, now))
}

/// Highest [`controversy_score`] first; items without votes on both sides sink.
pub fn controversial<T: Votable + Clone>(items: &[T]) -> Vec<T> {
    sort_by_score_desc(items, controversy_score)
}

// Scores are computed once per item, not once per comparison.
fn sort_by_score_desc<T, F>(items: &[T], score: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut scored: Vec<(f64, &T)> = items.iter().map(|item| (score(item), item)).collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, item)| item.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use ranking_shared::types::{TargetKind, VotableItem};
    use uuid::Uuid;

    const ALL_MODES: [SortMode; 5] = [
        SortMode::Hot,
        SortMode::New,
        SortMode::Top,
        SortMode::Rising,
        SortMode::Controversial,
    ];

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_755_182_913, 0).unwrap()
    }

    fn item(upvotes: u64, downvotes: u64, created_at: DateTime<Utc>) -> VotableItem {
        VotableItem {
            id: Uuid::new_v4(),
            kind: TargetKind::Post,
            scope: "rust".to_string(),
            created_at,
            upvotes,
            downvotes,
        }
    }

    fn ids(items: &[VotableItem]) -> Vec<Uuid> {
        items.iter().map(|item| item.id).collect()
    }

    fn random_items(seed: u64, count: usize) -> Vec<VotableItem> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                // Coarse buckets so that ties actually occur.
                let age = Duration::hours(rng.gen_range(0..72));
                item(rng.gen_range(0..6), rng.gen_range(0..6), now() - age)
            })
            .collect()
    }

    fn assert_is_permutation(input: &[VotableItem], output: &[VotableItem]) {
        let mut expected = ids(input);
        let mut actual = ids(output);
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
    }

    fn assert_non_increasing(values: &[f64]) {
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1], "{} ranked above {}", pair[0], pair[1]);
        }
    }

    /// A: 10/2 now, B: 10/2 two days ago, C: 3/1 an hour ago.
    fn scenario() -> (VotableItem, VotableItem, VotableItem) {
        (
            item(10, 2, now()),
            item(10, 2, now() - Duration::hours(48)),
            item(3, 1, now() - Duration::hours(1)),
        )
    }

    #[test]
    fn test_empty_input_returns_empty_output() {
        let empty: Vec<VotableItem> = Vec::new();
        for mode in ALL_MODES {
            assert!(rank_at(&empty, mode, None, now()).is_empty());
        }
    }

    #[test]
    fn test_single_item_is_returned_unchanged() {
        let only = vec![item(4, 9, now() - Duration::minutes(5))];
        for mode in ALL_MODES {
            assert_eq!(rank_at(&only, mode, Some(TimeWindow::Hour), now()), only);
        }
    }

    #[test]
    fn test_ranking_is_idempotent_and_complete() {
        let items = random_items(7, 60);
        for mode in ALL_MODES {
            let first = rank_at(&items, mode, Some(TimeWindow::All), now());
            let second = rank_at(&items, mode, Some(TimeWindow::All), now());
            assert_eq!(first, second);
            assert_is_permutation(&items, &first);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let items = random_items(11, 20);
        let snapshot = items.clone();
        for mode in ALL_MODES {
            let _ = rank_at(&items, mode, None, now());
        }
        assert_eq!(items, snapshot);
    }

    #[test]
    fn test_new_orders_by_creation_descending() {
        let items = random_items(3, 50);
        let ranked = new(&items);
        for pair in ranked.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_top_windowing() {
        let fresh = item(1, 0, now());
        let two_hours = item(5, 0, now() - Duration::hours(2));
        let two_days = item(9, 0, now() - Duration::days(2));
        let items = vec![fresh.clone(), two_hours.clone(), two_days.clone()];

        assert_eq!(ids(&top_at(&items, TimeWindow::Hour, now())), vec![fresh.id]);
        assert_eq!(
            ids(&top_at(&items, TimeWindow::Day, now())),
            vec![two_hours.id, fresh.id]
        );
        assert_eq!(
            ids(&top_at(&items, TimeWindow::All, now())),
            vec![two_days.id, two_hours.id, fresh.id]
        );
    }

    #[test]
    fn test_top_window_boundaries_are_fixed_spans() {
        let just_inside_month = item(1, 0, now() - Duration::days(30));
        let just_outside_month = item(1, 0, now() - Duration::days(30) - Duration::milliseconds(1));
        let items = vec![just_inside_month.clone(), just_outside_month.clone()];

        assert_eq!(
            ids(&top_at(&items, TimeWindow::Month, now())),
            vec![just_inside_month.id]
        );
        assert_eq!(top_at(&items, TimeWindow::Year, now()).len(), 2);
    }

    #[test]
    fn test_top_orders_by_net_score() {
        let items = random_items(5, 50);
        let ranked = top_at(&items, TimeWindow::All, now());
        let scores: Vec<f64> = ranked.iter().map(|i| i.score() as f64).collect();
        assert_non_increasing(&scores);
    }

    #[test]
    fn test_window_ignored_outside_top() {
        let items = random_items(9, 30);
        for mode in [SortMode::Hot, SortMode::New, SortMode::Rising, SortMode::Controversial] {
            assert_eq!(
                rank_at(&items, mode, Some(TimeWindow::Hour), now()),
                rank_at(&items, mode, None, now())
            );
        }
    }

    #[test]
    fn test_hot_prefers_recent_item_with_equal_score() {
        let recent = item(6, 1, now());
        let day_old = item(6, 1, now() - Duration::hours(24));
        let ranked = hot(&[day_old.clone(), recent.clone()]);
        assert_eq!(ids(&ranked), vec![recent.id, day_old.id]);
    }

    #[test]
    fn test_hot_total_ordering() {
        let items = random_items(13, 80);
        let scores: Vec<f64> = hot(&items).iter().map(hot_score).collect();
        assert_non_increasing(&scores);
    }

    #[test]
    fn test_rising_prefers_younger_item_with_equal_score() {
        let young = item(4, 0, now() - Duration::hours(1));
        let old = item(4, 0, now() - Duration::hours(10));
        let ranked = rising_at(&[old.clone(), young.clone()], now());
        assert_eq!(ids(&ranked), vec![young.id, old.id]);
    }

    #[test]
    fn test_rising_total_ordering() {
        let items = random_items(17, 80);
        let scores: Vec<f64> = rising_at(&items, now())
            .iter()
            .map(|i| rising_score(i, now()))
            .collect();
        assert_non_increasing(&scores);
    }

    #[test]
    fn test_controversial_zero_floor_sinks_one_sided_items() {
        let one_sided = item(5, 0, now());
        let unvoted = item(0, 0, now());
        let contested = item(10, 9, now());
        assert_eq!(controversy_score(&one_sided), controversy_score(&unvoted));
        assert_eq!(controversy_score(&one_sided), 0.0);

        let ranked = controversial(&[one_sided.clone(), unvoted.clone(), contested.clone()]);
        assert_eq!(ranked[0].id, contested.id);
    }

    #[test]
    fn test_controversial_total_ordering() {
        let items = random_items(19, 80);
        let scores: Vec<f64> = controversial(&items).iter().map(controversy_score).collect();
        assert_non_increasing(&scores);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut items: Vec<VotableItem> = (0..10).map(|_| item(2, 1, now())).collect();
        items.shuffle(&mut StdRng::seed_from_u64(23));
        for mode in ALL_MODES {
            assert_eq!(ids(&rank_at(&items, mode, None, now())), ids(&items));
        }
    }

    #[test]
    fn test_scenario_new_and_top() {
        let (a, b, c) = scenario();
        let items = vec![a.clone(), b.clone(), c.clone()];

        assert_eq!(ids(&new(&items)), vec![a.id, c.id, b.id]);
        assert_eq!(
            ids(&top_at(&items, TimeWindow::All, now())),
            vec![a.id, b.id, c.id]
        );
    }

    #[test]
    fn test_scenario_hot() {
        let (a, b, c) = scenario();

        let now_secs = now().timestamp() as f64 - REFERENCE_EPOCH_SECS as f64;
        let expected_a = 8f64.log10() + now_secs / 45_000.0;
        let expected_b = 8f64.log10() + (now_secs - 48.0 * 3600.0) / 45_000.0;
        let expected_c = 2f64.log10() + (now_secs - 3600.0) / 45_000.0;
        assert!((hot_score(&a) - expected_a).abs() < 1e-9);
        assert!((hot_score(&b) - expected_b).abs() < 1e-9);
        assert!((hot_score(&c) - expected_c).abs() < 1e-9);

        // C trails A by log10(4) + 0.08 but leads B by 3.76 - log10(4).
        assert!(expected_a > expected_c && expected_c > expected_b);
        let ranked = hot(&[b.clone(), c.clone(), a.clone()]);
        assert_eq!(ids(&ranked), vec![a.id, c.id, b.id]);
    }

    #[test]
    fn test_scenario_rising_and_controversial() {
        let (a, b, c) = scenario();
        let items = vec![b.clone(), c.clone(), a.clone()];

        // 8 / 2^1.5, 2 / 3^1.5, 8 / 50^1.5
        assert_eq!(ids(&rising_at(&items, now())), vec![a.id, c.id, b.id]);

        // A and B tie on 20 / 12^1.2 and keep input order; C has 3 / 4^1.2.
        assert_eq!(ids(&controversial(&items)), vec![b.id, a.id, c.id]);
    }

    #[test]
    fn test_rank_dispatch_defaults_window_to_all() {
        let (a, b, c) = scenario();
        let items = vec![a, b, c];
        assert_eq!(
            rank_at(&items, SortMode::Top, None, now()),
            top_at(&items, TimeWindow::All, now())
        );
        assert_eq!(rank(&items, SortMode::New, None), new(&items));
    }
}
