//! Postings per calendar month.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::data::FilteredView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: u64,
}

/// Count postings by month, oldest first. Months with no postings are absent.
pub fn timeline_view(view: &FilteredView) -> Vec<MonthCount> {
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for date in view.iter().filter_map(|r| r.posted_date) {
        *months.entry((date.year(), date.month())).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month), count)| MonthCount {
            month: format!("{year:04}-{month:02}"),
            count,
        })
        .collect()
}
