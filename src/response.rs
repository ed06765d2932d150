//! Combine the six views and the metadata lists into one payload.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::FilteredView;
use crate::views::{
    bar_view, parallel_view, pie_view, scatter_view, timeline_view, tree_view, BarItem,
    MonthCount, ParallelRow, PieSlice, ScatterPoint, TreeRoot,
};

/// Body of `GET /api/data`. Every field is always serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub bar_data: Vec<BarItem>,
    pub pie_data: Vec<PieSlice>,
    pub line_data: Vec<MonthCount>,
    pub scatter_data: Vec<ScatterPoint>,
    pub tree_data: TreeRoot,
    pub parallel_data: Vec<ParallelRow>,
    /// Sorted distinct experience levels in the view.
    pub experience_levels: Vec<String>,
    /// Sorted distinct industries in the view, missing ones excluded.
    pub industries: Vec<String>,
}

/// Body of `GET /api/options`: the choices offered by the filter widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub industries: Vec<String>,
    pub countries: Vec<String>,
}

pub fn build_dashboard(view: &FilteredView) -> DashboardData {
    let experience_levels: BTreeSet<&str> = view
        .iter()
        .filter_map(|r| r.experience_level.as_deref())
        .collect();
    let industries: BTreeSet<&str> = view.iter().filter_map(|r| r.industry.as_deref()).collect();

    DashboardData {
        bar_data: bar_view(view),
        pie_data: pie_view(view),
        line_data: timeline_view(view),
        scatter_data: scatter_view(view),
        tree_data: tree_view(view),
        parallel_data: parallel_view(view),
        experience_levels: experience_levels.into_iter().map(str::to_string).collect(),
        industries: industries.into_iter().map(str::to_string).collect(),
    }
}
