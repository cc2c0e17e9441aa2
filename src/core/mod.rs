pub mod extent;
pub mod geo;
