//! Dataset-wide summary: per-class counts, mean/stddev of valid ratings,
//! and a fixed-bucket histogram.

use serde::Serialize;

use crate::rating::{RatingEvent, MIN_RATING};
use crate::stats::mean_and_sample_variance;

// ---------------------------------------------------------------------------
// Histogram layout
// ---------------------------------------------------------------------------

/// Width of one histogram bucket.
pub const BUCKET_WIDTH: f64 = 0.5;
/// Number of buckets covering `[MIN_RATING, MAX_RATING]` at
/// [`BUCKET_WIDTH`] steps.
pub const BUCKET_COUNT: usize = 18;

/// Bucket index for a valid score: `floor((score - 1.0) / 0.5)`, clamped
/// so the top edge (exactly 10.0) lands in the last bucket.
pub fn bucket_index(score: f64) -> usize {
    let idx = ((score - MIN_RATING) / BUCKET_WIDTH).floor() as isize;
    idx.clamp(0, BUCKET_COUNT as isize - 1) as usize
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Summary of the whole event set.
///
/// `mean` and `stddev` cover valid-class events only; both are 0.0 when
/// there are no valid ratings. `stddev` is the sample standard deviation
/// (n-1 divisor when n > 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total: usize,
    pub valid_count: usize,
    pub skip_count: usize,
    pub flag_count: usize,
    pub mean: f64,
    pub stddev: f64,
    /// Valid-rating counts per 0.5-wide bucket, lowest bucket first.
    pub histogram: Vec<u64>,
}

/// Compute the overview for an event set. Pure and deterministic.
pub fn compute_overview(events: &[RatingEvent]) -> Overview {
    let mut skip_count = 0usize;
    let mut flag_count = 0usize;
    let mut scores = Vec::new();
    let mut histogram = vec![0u64; BUCKET_COUNT];

    for event in events {
        match event.value.score() {
            Some(score) => {
                histogram[bucket_index(score)] += 1;
                scores.push(score);
            }
            None if event.value.is_skip() => skip_count += 1,
            None => flag_count += 1,
        }
    }

    let (mean, variance) = mean_and_sample_variance(&scores).unwrap_or((0.0, 0.0));

    Overview {
        total: events.len(),
        valid_count: scores.len(),
        skip_count,
        flag_count,
        mean,
        stddev: variance.sqrt(),
        histogram,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
