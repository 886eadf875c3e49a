pub mod auth_service;
pub mod dashboard;
pub mod finance;
pub mod integrity;
pub mod schema;
