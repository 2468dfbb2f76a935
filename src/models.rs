pub mod access;
pub mod dashboard;
pub mod order;
pub mod principal;
pub mod report;
pub mod restaurant;
