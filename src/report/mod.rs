pub mod column;
pub mod display;
pub mod filters;
pub mod formatter;
pub mod row;

pub use column::{comparison_columns, Column, FieldType};
pub use filters::{FilterError, ReportFilters, ValidatedFilters};
pub use formatter::{render_cell, Emphasis, RenderError, RenderedCell};
pub use row::{build_report, build_row, ComparisonRow, LiabilityRecord};
