pub mod fits;
pub mod vis_file;

pub use fits::{read_fits2d, write_fits2d, FitsWriteOptions};
pub use vis_file::{read_visibility, write_visibility};
