pub mod articles;
pub mod charts;
pub mod dashboard;
pub mod panels;
