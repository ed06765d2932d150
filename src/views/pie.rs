//! Employment-type distribution.

use serde::Serialize;

use super::grouping::group_by;
use crate::data::FilteredView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
}

/// Posting count per employment type, largest first; ties keep first appearance.
pub fn pie_view(view: &FilteredView) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = group_by(view.iter(), |r| r.employment_type.clone())
        .into_iter()
        .map(|(name, records)| PieSlice {
            name,
            value: records.len() as u64,
        })
        .collect();

    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices
}
