//! Per-user quality signals.
//!
//! The suspicious-user heuristic is advisory only: the engine never drops
//! data, it just surfaces users whose submission pattern looks like noise
//! (straight-lining the scale ends, or flagging most of what they see) so
//! a human can review them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::rating::{RatingEvent, MAX_RATING, MIN_RATING};
use crate::stats::mean_and_sample_variance;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Heuristic thresholds
// ---------------------------------------------------------------------------

/// Minimum submissions (or valid ratings) before a user can be marked
/// suspicious; below this the ratios are too noisy to act on.
pub const SUSPICIOUS_MIN_SAMPLES: usize = 5;
/// Fraction of valid ratings at the scale ends above which a user looks
/// like a straight-liner.
pub const EXTREMITY_RATIO_THRESHOLD: f64 = 0.8;
/// Fraction of flags above which a user looks like they are mass-flagging.
pub const FLAG_RATIO_THRESHOLD: f64 = 0.5;

// ---------------------------------------------------------------------------
// UserStatistic
// ---------------------------------------------------------------------------

/// Aggregates and quality signals for one user identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatistic {
    pub user_identifier: String,
    pub total_submissions: usize,
    pub valid_count: usize,
    pub skip_count: usize,
    pub flag_count: usize,
    /// Mean of the user's valid ratings, `None` when they have none.
    pub mean: Option<f64>,
    /// `flag_count / total_submissions`.
    pub flag_ratio: f64,
    /// Fraction of valid ratings equal to exactly the scale minimum or
    /// maximum; 0.0 when the user has no valid ratings.
    pub extremity_ratio: f64,
    pub first_submission: Timestamp,
    pub last_submission: Timestamp,
    pub suspicious: bool,
}

/// Pure predicate behind the `suspicious` field, kept separate so the
/// thresholds can be tuned and tested without touching storage code.
pub fn is_suspicious(stat: &UserStatistic) -> bool {
    (stat.extremity_ratio > EXTREMITY_RATIO_THRESHOLD
        && stat.valid_count >= SUSPICIOUS_MIN_SAMPLES)
        || (stat.flag_ratio > FLAG_RATIO_THRESHOLD
            && stat.total_submissions >= SUSPICIOUS_MIN_SAMPLES)
}

/// Group events by user identifier and derive per-user signals.
///
/// Ordered by total submissions descending, ties by user identifier
/// ascending (the dashboard shows the most active raters first).
pub fn compute_user_statistics(events: &[RatingEvent]) -> Vec<UserStatistic> {
    let mut grouped: BTreeMap<&str, Vec<&RatingEvent>> = BTreeMap::new();
    for event in events {
        grouped
            .entry(event.user_identifier.as_str())
            .or_default()
            .push(event);
    }

    let mut stats: Vec<UserStatistic> = grouped
        .into_iter()
        .map(|(user, events)| user_statistic(user, &events))
        .collect();

    stats.sort_by(|a, b| {
        b.total_submissions
            .cmp(&a.total_submissions)
            .then_with(|| a.user_identifier.cmp(&b.user_identifier))
    });
    stats
}

fn user_statistic(user: &str, events: &[&RatingEvent]) -> UserStatistic {
    let mut skip_count = 0usize;
    let mut flag_count = 0usize;
    let mut extreme_count = 0usize;
    let mut scores = Vec::new();
    let mut first = events[0].timestamp;
    let mut last = events[0].timestamp;

    for event in events {
        first = first.min(event.timestamp);
        last = last.max(event.timestamp);
        match event.value.score() {
            Some(score) => {
                if score == MIN_RATING || score == MAX_RATING {
                    extreme_count += 1;
                }
                scores.push(score);
            }
            None if event.value.is_skip() => skip_count += 1,
            None => flag_count += 1,
        }
    }

    let total = events.len();
    let extremity_ratio = if scores.is_empty() {
        0.0
    } else {
        extreme_count as f64 / scores.len() as f64
    };

    let mut stat = UserStatistic {
        user_identifier: user.to_string(),
        total_submissions: total,
        valid_count: scores.len(),
        skip_count,
        flag_count,
        mean: mean_and_sample_variance(&scores).map(|(mean, _)| mean),
        flag_ratio: flag_count as f64 / total as f64,
        extremity_ratio,
        first_submission: first,
        last_submission: last,
        suspicious: false,
    };
    stat.suspicious = is_suspicious(&stat);
    stat
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
