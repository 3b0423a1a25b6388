// Library for the server binary, the report CLI and the integration tests

pub mod aggregation;
pub mod artifact_repo;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod reading_repo;
pub mod report;
pub mod routes;
pub mod timestamp;
pub mod trend;
pub mod version;
pub mod weather_client;
pub mod worker;
