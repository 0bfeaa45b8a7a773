pub mod index;
pub mod stats;

pub use index::{linear_index, to_row_col, wrap_mod};
pub use stats::StatsHelper;
