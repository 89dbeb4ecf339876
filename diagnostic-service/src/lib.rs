pub mod client;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod startup;
