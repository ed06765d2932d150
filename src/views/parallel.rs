//! Parallel-coordinates rows.

use serde::Serialize;

use crate::data::FilteredView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelRow {
    #[serde(rename = "Experience Level")]
    pub experience_level: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Salary (USD)")]
    pub salary_usd: f64,
}

/// Rows with experience level, industry, and salary all present, in view order.
pub fn parallel_view(view: &FilteredView) -> Vec<ParallelRow> {
    view.iter()
        .filter_map(|r| {
            Some(ParallelRow {
                experience_level: r.experience_level.clone()?,
                industry: r.industry.clone()?,
                salary_usd: r.salary_usd?,
            })
        })
        .collect()
}
