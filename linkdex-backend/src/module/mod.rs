pub mod browse;
pub mod catalog;
pub mod visits;
pub mod websearch;
