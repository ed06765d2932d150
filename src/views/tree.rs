//! Salary totals nested country → industry.

use serde::Serialize;

use super::grouping::group_by;
use crate::data::FilteredView;

/// Leaf label for postings without an industry.
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRoot {
    pub name: String,
    pub children: Vec<CountryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryNode {
    pub name: String,
    pub children: Vec<IndustryLeaf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryLeaf {
    pub name: String,
    pub value: i64,
}

impl TreeRoot {
    /// Sum of every leaf value.
    pub fn total(&self) -> i64 {
        self.children
            .iter()
            .flat_map(|c| &c.children)
            .map(|leaf| leaf.value)
            .sum()
    }
}

/// Two-level hierarchy: countries in first-appearance order, then the
/// industries seen within each country in first-appearance order.
///
/// Leaf values are salary sums truncated toward zero. Records without an
/// industry are gathered under [`UNKNOWN_INDUSTRY`]; that bucket is keyed
/// separately from any real industry of the same name.
pub fn tree_view(view: &FilteredView) -> TreeRoot {
    let children = group_by(view.iter(), |r| Some(r.country.clone()))
        .into_iter()
        .map(|(country, records)| {
            let leaves = group_by(records, |r| Some(r.industry.clone()))
                .into_iter()
                .map(|(industry, members)| {
                    let sum: f64 = members.iter().filter_map(|r| r.salary_usd).sum();
                    IndustryLeaf {
                        name: industry.unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string()),
                        value: sum.trunc() as i64,
                    }
                })
                .collect();
            CountryNode {
                name: country,
                children: leaves,
            }
        })
        .collect();

    TreeRoot {
        name: "root".to_string(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::RecordStore;
    use crate::test_support::{record, with_salary};

    fn leaf(name: &str, value: i64) -> IndustryLeaf {
        IndustryLeaf {
            name: name.into(),
            value,
        }
    }

    #[test]
    fn nests_in_first_appearance_order() {
        let store = RecordStore::from_records(vec![
            record("Toronto, Canada", Some("Finance"), "Mid", 10.0, "2023-01-01"),
            record("Austin, USA", Some("Tech"), "Mid", 20.0, "2023-01-01"),
            record("Boston, USA", Some("Health"), "Mid", 30.0, "2023-01-01"),
            record("Denver, USA", Some("Tech"), "Mid", 40.5, "2023-01-01"),
            record("Ottawa, Canada", Some("Finance"), "Mid", 50.9, "2023-01-01"),
        ]);
        let tree = tree_view(&FilteredView::all(&store));
        assert_eq!(
            tree,
            TreeRoot {
                name: "root".into(),
                children: vec![
                    CountryNode {
                        name: "Canada".into(),
                        children: vec![leaf("Finance", 60)],
                    },
                    CountryNode {
                        name: "USA".into(),
                        children: vec![leaf("Tech", 60), leaf("Health", 30)],
                    },
                ],
            }
        );
    }

    #[test]
    fn missing_industry_gets_its_own_bucket() {
        let store = RecordStore::from_records(vec![
            record("Austin, USA", None, "Mid", 1_000.0, "2023-01-01"),
            record("Austin, USA", Some("Unknown"), "Mid", 2_000.0, "2023-01-01"),
            record("Austin, USA", None, "Mid", 500.0, "2023-01-01"),
            with_salary(record("Austin, USA", None, "Mid", 0.0, "2023-01-01"), None),
        ]);
        let tree = tree_view(&FilteredView::all(&store));
        assert_eq!(
            tree.children[0].children,
            vec![leaf(UNKNOWN_INDUSTRY, 1_500), leaf("Unknown", 2_000)]
        );
        assert_eq!(tree.total(), 3_500);
    }

    #[test]
    fn empty_view_has_bare_root() {
        let store = RecordStore::default();
        let tree = tree_view(&FilteredView::all(&store));
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            serde_json::json!({"name": "root", "children": []})
        );
    }
}
