pub mod field;
pub mod geometry;
pub mod time;
