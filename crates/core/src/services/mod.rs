pub mod chart_service;
pub mod detail_service;
pub mod revalidation;
pub mod series_service;
