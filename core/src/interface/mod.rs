pub mod visibility;

pub use visibility::VisibilitySet;
