//! Salary against experience, one point per posting.

use serde::Serialize;

use crate::data::FilteredView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    #[serde(rename = "Experience Level")]
    pub experience_level: Option<String>,
    #[serde(rename = "Salary (USD)")]
    pub salary_usd: Option<f64>,
    #[serde(rename = "Industry")]
    pub industry: Option<String>,
}

/// Project every record in view order; missing fields become `null`.
pub fn scatter_view(view: &FilteredView) -> Vec<ScatterPoint> {
    view.iter()
        .map(|r| ScatterPoint {
            experience_level: r.experience_level.clone(),
            salary_usd: r.salary_usd,
            industry: r.industry.clone(),
        })
        .collect()
}
