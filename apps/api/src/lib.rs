pub mod applications;
pub mod config;
pub mod db;
pub mod errors;
pub mod inquiries;
pub mod models;
pub mod ratelimit;
pub mod routes;
pub mod sanitize;
pub mod state;
pub mod upload;
