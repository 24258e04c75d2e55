//! Per-image aggregates and the ranking views the dashboard shows:
//! top-rated, bottom-rated and most controversial.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::rating::RatingEvent;
use crate::stats::mean_and_sample_variance;

// ---------------------------------------------------------------------------
// ImageStatistic
// ---------------------------------------------------------------------------

/// Aggregates for one image.
///
/// `mean` and `variance` are `None` when the image has no valid ratings
/// (skips and flags carry no score); such images still appear in the full
/// statistics list but are excluded from both rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageStatistic {
    pub image_id: String,
    pub valid_count: usize,
    pub skip_count: usize,
    pub flag_count: usize,
    pub mean: Option<f64>,
    /// Sample variance of valid ratings, the controversy proxy.
    pub variance: Option<f64>,
}

/// Group events by image and compute per-image aggregates.
///
/// The returned list is ordered by image id ascending, so identical input
/// always yields identical output.
pub fn compute_image_statistics(events: &[RatingEvent]) -> Vec<ImageStatistic> {
    let mut scores: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut skips: BTreeMap<&str, usize> = BTreeMap::new();
    let mut flags: BTreeMap<&str, usize> = BTreeMap::new();

    for event in events {
        let image_id = event.image_id.as_str();
        match event.value.score() {
            Some(score) => scores.entry(image_id).or_default().push(score),
            None if event.value.is_skip() => *skips.entry(image_id).or_default() += 1,
            None => *flags.entry(image_id).or_default() += 1,
        }
        // Make sure every image is represented in all three maps.
        scores.entry(image_id).or_default();
    }

    scores
        .into_iter()
        .map(|(image_id, scores)| {
            let stats = mean_and_sample_variance(&scores);
            ImageStatistic {
                image_id: image_id.to_string(),
                valid_count: scores.len(),
                skip_count: skips.get(image_id).copied().unwrap_or(0),
                flag_count: flags.get(image_id).copied().unwrap_or(0),
                mean: stats.map(|(mean, _)| mean),
                variance: stats.map(|(_, variance)| variance),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// The `limit` highest-mean images. Ties break by valid-count descending,
/// then image id ascending; images with no valid ratings are excluded.
pub fn top_rated(stats: &[ImageStatistic], limit: usize) -> Vec<ImageStatistic> {
    ranked_by(stats, limit, |stat| stat.mean)
}

/// The `limit` lowest-mean images, lowest first, same tie-break chain as
/// [`top_rated`].
pub fn bottom_rated(stats: &[ImageStatistic], limit: usize) -> Vec<ImageStatistic> {
    // Negating the key turns the descending rank into an ascending one.
    ranked_by(stats, limit, |stat| stat.mean.map(|mean| -mean))
}

/// The `limit` highest-variance images, same tie-break chain as
/// [`top_rated`].
pub fn most_controversial(stats: &[ImageStatistic], limit: usize) -> Vec<ImageStatistic> {
    ranked_by(stats, limit, |stat| stat.variance)
}

fn ranked_by(
    stats: &[ImageStatistic],
    limit: usize,
    key: impl Fn(&ImageStatistic) -> Option<f64>,
) -> Vec<ImageStatistic> {
    let mut ranked: Vec<&ImageStatistic> = stats.iter().filter(|s| key(s).is_some()).collect();
    ranked.sort_by(|a, b| {
        // Keys are never NaN: they come from finite valid scores.
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.valid_count.cmp(&a.valid_count))
            .then_with(|| a.image_id.cmp(&b.image_id))
    });
    ranked.into_iter().take(limit).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingValue;

    fn event(image: &str, user: &str, raw: f64) -> RatingEvent {
        RatingEvent {
            id: format!("{image}:{user}"),
            image_id: image.to_string(),
            value: RatingValue::from_stored(raw).unwrap(),
            user_identifier: user.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }

    // -- compute_image_statistics ---------------------------------------------

    #[test]
    fn empty_event_set_yields_empty_list() {
        assert!(compute_image_statistics(&[]).is_empty());
    }

    #[test]
    fn per_image_counts_and_moments() {
        let events = vec![
            event("a", "u1", 2.0),
            event("a", "u2", 4.0),
            event("a", "u3", 6.0),
            event("a", "u4", 8.0),
            event("a", "u5", -1.0),
            event("a", "u6", -2.0),
        ];
        let stats = compute_image_statistics(&events);
        assert_eq!(stats.len(), 1);
        let a = &stats[0];
        assert_eq!(a.valid_count, 4);
        assert_eq!(a.skip_count, 1);
        assert_eq!(a.flag_count, 1);
        assert_eq!(a.mean, Some(5.0));
        assert!((a.variance.unwrap() - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn image_with_only_sentinels_has_no_moments() {
        let events = vec![event("a", "u1", -1.0), event("a", "u2", -2.0)];
        let stats = compute_image_statistics(&events);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].valid_count, 0);
        assert_eq!(stats[0].mean, None);
        assert_eq!(stats[0].variance, None);
    }

    #[test]
    fn full_list_ordered_by_image_id() {
        let events = vec![
            event("c", "u1", 5.0),
            event("a", "u1", 5.0),
            event("b", "u1", 5.0),
        ];
        let stats = compute_image_statistics(&events);
        let ids: Vec<&str> = stats.iter().map(|s| s.image_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    // -- rankings -------------------------------------------------------------

    #[test]
    fn top_rated_orders_by_mean_then_count_then_id() {
        let events = vec![
            // "a": mean 8.0 from one rating.
            event("a", "u1", 8.0),
            // "b": mean 8.0 from two ratings -> beats "a" on count.
            event("b", "u1", 8.0),
            event("b", "u2", 8.0),
            // "c": mean 9.0 -> first.
            event("c", "u1", 9.0),
            // "d": sentinels only -> excluded.
            event("d", "u1", -2.0),
        ];
        let stats = compute_image_statistics(&events);
        let top = top_rated(&stats, 10);
        let ids: Vec<&str> = top.iter().map(|s| s.image_id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn bottom_rated_orders_by_mean_ascending() {
        let events = vec![
            // "low" mean 2.0 from one rating.
            event("low", "u1", 2.0),
            // "lower" mean 2.0 from two ratings -> beats "low" on count.
            event("lower", "u1", 2.0),
            event("lower", "u2", 2.0),
            // "mid" mean 6.0 -> last.
            event("mid", "u1", 6.0),
            // Sentinels only -> excluded.
            event("skipped", "u1", -1.0),
        ];
        let stats = compute_image_statistics(&events);
        let bottom = bottom_rated(&stats, 10);
        let ids: Vec<&str> = bottom.iter().map(|s| s.image_id.as_str()).collect();
        assert_eq!(ids, ["lower", "low", "mid"]);
    }

    #[test]
    fn most_controversial_orders_by_variance() {
        let events = vec![
            // "a": unanimous -> variance 0.
            event("a", "u1", 5.0),
            event("a", "u2", 5.0),
            // "b": split opinions -> high variance.
            event("b", "u1", 1.0),
            event("b", "u2", 10.0),
        ];
        let stats = compute_image_statistics(&events);
        let ranked = most_controversial(&stats, 10);
        let ids: Vec<&str> = ranked.iter().map(|s| s.image_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn ranking_limit_applies() {
        let events = vec![
            event("a", "u1", 3.0),
            event("b", "u1", 4.0),
            event("c", "u1", 5.0),
        ];
        let stats = compute_image_statistics(&events);
        assert_eq!(top_rated(&stats, 2).len(), 2);
    }

    #[test]
    fn rankings_are_deterministic() {
        let events = vec![
            event("a", "u1", 5.0),
            event("b", "u1", 5.0),
            event("c", "u1", 5.0),
        ];
        let stats = compute_image_statistics(&events);
        assert_eq!(top_rated(&stats, 3), top_rated(&stats, 3));
        // All tied on mean and count: the id tie-break decides.
        let top = top_rated(&stats, 3);
        let ids: Vec<&str> = top.iter().map(|s| s.image_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
