//! Chart-ready aggregate views over a [`FilteredView`](crate::data::FilteredView).
//!
//! Each view is a pure function of the filtered records and shares no state
//! with the others.

pub mod bar;
pub mod grouping;
pub mod parallel;
pub mod pie;
pub mod scatter;
pub mod timeline;
pub mod tree;

pub use bar::{bar_view, BarItem};
pub use parallel::{parallel_view, ParallelRow};
pub use pie::{pie_view, PieSlice};
pub use scatter::{scatter_view, ScatterPoint};
pub use timeline::{timeline_view, MonthCount};
pub use tree::{tree_view, CountryNode, IndustryLeaf, TreeRoot, UNKNOWN_INDUSTRY};
