pub mod api;
pub mod app;
pub mod config;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
