pub mod grid;
pub mod quick_range;

pub use grid::{build_grid, GridCell, MonthCursor, GRID_CELLS};
pub use quick_range::{DateRange, QuickRange};
