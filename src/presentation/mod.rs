// Presentation layer - HTTP surface for the sensor dashboard
pub mod app_state;
pub mod handlers;
pub mod routes;
pub mod view;
