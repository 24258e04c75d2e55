//! Flat export projection of the event set for external consumers.
//!
//! Rows mirror the persisted fields, including the sentinel encoding in
//! the `rating` column (skip = -1, flag = -2). Consumers branch on the
//! value range to interpret; there is deliberately no separate status
//! column, for compatibility with the historical export format.

use std::borrow::Cow;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::rating::RatingEvent;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Which events to include in an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFilter {
    #[default]
    All,
    /// Valid-class ratings only; skips and flags are dropped.
    ValidOnly,
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// CSV header, one column per persisted field.
pub const CSV_HEADER: &str = "id,image_id,rating,user_identifier,timestamp";

/// One flat export record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub id: String,
    pub image_id: String,
    /// Flat encoding: a score in [1.0, 10.0], -1 (skip), or -2 (flag).
    pub rating: f64,
    pub user_identifier: String,
    pub timestamp: Timestamp,
}

/// Project events into export rows, preserving input order.
pub fn export_rows(events: &[RatingEvent], filter: ExportFilter) -> Vec<ExportRow> {
    events
        .iter()
        .filter(|event| match filter {
            ExportFilter::All => true,
            ExportFilter::ValidOnly => event.value.score().is_some(),
        })
        .map(|event| ExportRow {
            id: event.id.clone(),
            image_id: event.image_id.clone(),
            rating: event.value.to_stored(),
            user_identifier: event.user_identifier.clone(),
            timestamp: event.timestamp,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV rendering
// ---------------------------------------------------------------------------

/// Render rows as RFC 4180 CSV with a header line.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        // Only the user-supplied fields can contain delimiters.
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            csv_field(&row.id),
            csv_field(&row.image_id),
            row.rating,
            csv_field(&row.user_identifier),
            row.timestamp.to_rfc3339(),
        );
    }
    out
}

/// Quote a field if it contains a delimiter, quote, or newline.
fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
