pub mod access_service;
pub mod auth;
pub mod metrics_service;
pub mod report_service;
