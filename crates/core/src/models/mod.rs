pub mod cache;
pub mod chart;
pub mod detail;
pub mod overview;
pub mod price;
pub mod settings;
