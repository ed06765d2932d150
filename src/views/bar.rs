//! Average salary by experience level.

use serde::Serialize;

use super::grouping::group_by;
use crate::data::FilteredView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarItem {
    #[serde(rename = "Experience Level")]
    pub experience_level: String,
    #[serde(rename = "Salary (USD)")]
    pub salary_usd: f64,
}

/// Mean salary per experience level, highest first.
///
/// Only records with a numeric salary contribute, and a level with none is
/// left out entirely. Equal means keep first-appearance order.
pub fn bar_view(view: &FilteredView) -> Vec<BarItem> {
    let groups = group_by(view.iter(), |r| r.experience_level.clone());

    let mut items: Vec<BarItem> = groups
        .into_iter()
        .filter_map(|(level, records)| {
            let salaries: Vec<f64> = records.iter().filter_map(|r| r.salary_usd).collect();
            if salaries.is_empty() {
                return None;
            }
            let mean = salaries.iter().sum::<f64>() / salaries.len() as f64;
            Some(BarItem {
                experience_level: level,
                salary_usd: mean,
            })
        })
        .collect();

    items.sort_by(|a, b| b.salary_usd.total_cmp(&a.salary_usd));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordStore;
    use crate::test_support::{record, with_salary};

    #[test]
    fn sorts_by_mean_descending() {
        let store = RecordStore::from_records(vec![
            record("A, USA", Some("Tech"), "Junior", 40_000.0, "2023-01-01"),
            record("A, USA", Some("Tech"), "Senior", 100_000.0, "2023-01-01"),
            record("A, USA", Some("Tech"), "Junior", 60_000.0, "2023-01-01"),
            record("A, USA", Some("Tech"), "Senior", 120_000.0, "2023-01-01"),
        ]);
        let bars = bar_view(&FilteredView::all(&store));
        assert_eq!(
            bars,
            vec![
                BarItem { experience_level: "Senior".into(), salary_usd: 110_000.0 },
                BarItem { experience_level: "Junior".into(), salary_usd: 50_000.0 },
            ]
        );
    }

    #[test]
    fn ties_keep_first_appearance() {
        let store = RecordStore::from_records(vec![
            record("A, USA", None, "Mid", 50_000.0, "2023-01-01"),
            record("A, USA", None, "Lead", 50_000.0, "2023-01-01"),
            record("A, USA", None, "Entry", 50_000.0, "2023-01-01"),
        ]);
        let levels: Vec<String> = bar_view(&FilteredView::all(&store))
            .into_iter()
            .map(|b| b.experience_level)
            .collect();
        assert_eq!(levels, vec!["Mid", "Lead", "Entry"]);
    }

    #[test]
    fn levels_without_numeric_salary_are_omitted() {
        let store = RecordStore::from_records(vec![
            with_salary(record("A, USA", None, "Intern", 0.0, "2023-01-01"), None),
            with_salary(record("A, USA", None, "Senior", 0.0, "2023-01-01"), None),
            record("A, USA", None, "Senior", 90_000.0, "2023-01-01"),
        ]);
        let bars = bar_view(&FilteredView::all(&store));
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].experience_level, "Senior");
        assert_eq!(bars[0].salary_usd, 90_000.0);
    }
}
