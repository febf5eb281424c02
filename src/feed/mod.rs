pub mod download;
pub mod earthquake;
pub mod fault_line;
pub mod geometry;
