pub mod auth;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod input;
pub mod middleware;
pub mod routes;
pub mod views;

pub use routes::router;
